// UI module - handles all user interface rendering

mod nn;
mod settings;
mod state;
mod stats;

use egui_macroquad::egui;
use evodrive::simulation::world::Simulation;

pub use state::UIState;

pub fn draw_ui(state: &mut UIState, simulation: &Simulation) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        stats::draw_stats_panel(egui_ctx, state, simulation);

        if state.show_network {
            if let Some(autopilot) = simulation.best().and_then(|car| car.autopilot()) {
                egui::Window::new("Best Network")
                    .default_pos(egui::pos2(10.0, 10.0))
                    .resizable(false)
                    .show(egui_ctx, |ui| nn::draw_neural_network(ui, autopilot));
            }
        }
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
