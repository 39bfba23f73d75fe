use egui_macroquad::egui;
use evodrive::simulation::params::Params;
use evodrive::simulation::vehicle::OutputMapping;

use super::state::UIState;

/// Settings editor. Changes only take effect once "Apply" restarts the run.
pub(super) fn draw_settings(ui: &mut egui::Ui, state: &mut UIState) {
    ui.collapsing("⚙ Settings", |ui| {
        let params = &mut state.pending_params;

        ui.label("Population");
        ui.add(egui::Slider::new(&mut params.ai_cars, 1..=1000).text("AI Cars"));
        ui.add(egui::Slider::new(&mut params.traffic_cars, 0..=500).text("Traffic Cars"));
        ui.add(egui::Slider::new(&mut params.mutation_rate, 0.0..=1.0).text("Mutation Rate"));

        ui.separator();
        ui.label("Road");
        ui.add(egui::Slider::new(&mut params.lanes, 1..=10).text("Lanes"));
        ui.add(egui::Slider::new(&mut params.max_speed, 0.5..=10.0).text("Max Speed"));
        ui.add(egui::Slider::new(&mut params.traffic_speed, 0.5..=10.0).text("Traffic Speed"));
        ui.checkbox(&mut params.keyboard_car, "Keyboard car");

        ui.separator();
        ui.label("Sensor & Network");
        ui.add(egui::Slider::new(&mut params.ray_count, 1..=16).text("Rays"));
        ui.add(egui::Slider::new(&mut params.ray_length, 10.0..=500.0).text("Ray Length"));
        ui.add(
            egui::Slider::new(&mut params.ray_spread, 0.0..=std::f32::consts::TAU)
                .text("Ray Spread"),
        );
        ui.add(egui::Slider::new(&mut params.hidden_neurons, 1..=32).text("Hidden Neurons"));
        ui.horizontal(|ui| {
            ui.label("Outputs:");
            ui.radio_value(&mut params.output_mapping, OutputMapping::Aliased, "Aliased");
            ui.radio_value(
                &mut params.output_mapping,
                OutputMapping::Independent,
                "Independent",
            );
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                state.apply_settings_requested = true;
            }
            if ui.button("Reset to defaults").clicked() {
                state.pending_params = Params::default();
            }
        });
    });
}
