use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use evodrive::simulation::world::Simulation;

use super::state::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    simulation: &Simulation,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Simulation Stats");
                ui.separator();

                // Save/Discard/Next buttons
                ui.horizontal(|ui| {
                    if ui.button("💾 Save").clicked() {
                        state.save_requested = true;
                    }
                    if ui.button("🗑 Discard").clicked() {
                        state.discard_requested = true;
                    }
                    if ui.button("⏭ Next Generation").clicked() {
                        state.next_generation_requested = true;
                    }
                });

                ui.horizontal(|ui| {
                    let pause_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                    if ui.button(pause_text).clicked() {
                        state.paused = !state.paused;
                    }
                    ui.checkbox(&mut state.show_network, "Show network");
                });

                if let Some(ref msg) = state.status_message {
                    ui.label(msg);
                }

                ui.separator();

                ui.label("Simulation Speed");
                ui.add(egui::Slider::new(&mut state.ticks_per_frame, 1..=20).text("ticks/frame"));

                ui.separator();

                let stats = simulation.stats();
                ui.label(format!("Generation: {}", stats.generation));
                ui.label(format!("Ticks: {}", stats.ticks));
                ui.label(format!("Best progress: {:.1}", stats.best_progress));
                ui.label(format!("Damaged: {}/{}", stats.damaged, stats.population));
                ui.label(format!("Traffic: {}", simulation.traffic().len()));

                if let Some(best) = simulation.best() {
                    ui.label(format!(
                        "Best car #{}: speed {:.2}, heading {:.2}{}",
                        simulation.best_index(),
                        best.speed,
                        best.heading,
                        if best.is_damaged() { " (damaged)" } else { "" }
                    ));
                }
                if let Some(car) = simulation.keyboard_car() {
                    ui.label(format!(
                        "Keyboard car: progress {:.1}{}",
                        simulation.params().ai_start_y - car.pos.y,
                        if car.is_damaged() { " (damaged)" } else { "" }
                    ));
                }

                ui.separator();

                ui.label("Best Progress per Generation");
                let points: PlotPoints = simulation
                    .history()
                    .iter()
                    .map(|stats| [stats.generation as f64, stats.best_progress as f64])
                    .chain(std::iter::once([
                        stats.generation as f64,
                        stats.best_progress as f64,
                    ]))
                    .collect();
                Plot::new("progress_plot")
                    .height(150.0)
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            Line::new(points)
                                .color(egui::Color32::from_rgb(100, 150, 255))
                                .name("Best progress"),
                        );
                    });

                ui.separator();

                super::settings::draw_settings(ui, state);
            });
        });
}
