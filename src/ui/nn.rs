use egui_macroquad::egui;
use evodrive::simulation::vehicle::{Autopilot, OutputMapping};
use ndarray::Array1;

fn output_label(index: usize, mapping: OutputMapping) -> &'static str {
    match (mapping, index) {
        (_, 0) => "Forward",
        (OutputMapping::Aliased, 1) => "Steer/Reverse",
        (OutputMapping::Aliased, _) => "(unused)",
        (OutputMapping::Independent, 1) => "Left",
        (OutputMapping::Independent, 2) => "Right",
        (OutputMapping::Independent, _) => "Reverse",
    }
}

/// Draws the network with connections coloured by weight sign and neurons
/// lit by their last activation.
pub(super) fn draw_neural_network(ui: &mut egui::Ui, autopilot: &Autopilot) {
    let levels = autopilot.network.levels();

    // Before the first tick there are no activations yet; draw the layers idle.
    let idle: Vec<Array1<f32>>;
    let layer_activations = if autopilot.activations().len() == levels.len() + 1 {
        autopilot.activations()
    } else {
        idle = autopilot
            .network
            .layer_sizes()
            .into_iter()
            .map(Array1::zeros)
            .collect();
        idle.as_slice()
    };

    let width = 400.0;
    let height = 300.0;
    let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let rect = response.rect;

    let layer_count = layer_activations.len();
    let layer_spacing = rect.width() / (layer_count as f32 + 1.0);
    let neuron_y = |index: usize, count: usize| {
        rect.top() + rect.height() * (index as f32 + 1.0) / (count as f32 + 1.0)
    };

    // Draw connections first (so they appear behind neurons)
    for (layer_idx, level) in levels.iter().enumerate() {
        let inputs = &layer_activations[layer_idx];
        let x1 = rect.left() + layer_spacing * (layer_idx + 1) as f32;
        let x2 = rect.left() + layer_spacing * (layer_idx + 2) as f32;

        for ((in_idx, out_idx), &weight) in level.weights.indexed_iter() {
            let y1 = neuron_y(in_idx, level.input_count());
            let y2 = neuron_y(out_idx, level.output_count());

            // Active inputs carry their weight at full strength.
            let alpha = if inputs[in_idx] > 0.0 { 255 } else { 90 };
            let intensity = (weight.abs().min(1.0) * 255.0) as u8;
            let color = if weight > 0.0 {
                egui::Color32::from_rgba_unmultiplied(intensity, intensity, 0, alpha)
            } else {
                egui::Color32::from_rgba_unmultiplied(0, 0, intensity, alpha)
            };

            painter.line_segment(
                [egui::pos2(x1, y1), egui::pos2(x2, y2)],
                egui::Stroke::new(1.0 + weight.abs() * 1.5, color),
            );
        }
    }

    // Draw neurons
    for (layer_idx, activations) in layer_activations.iter().enumerate() {
        let x = rect.left() + layer_spacing * (layer_idx + 1) as f32;
        let neuron_count = activations.len();
        let is_input_layer = layer_idx == 0;
        let is_output_layer = layer_idx == layer_count - 1;

        for (neuron_idx, &activation) in activations.iter().enumerate() {
            let y = neuron_y(neuron_idx, neuron_count);

            // Inputs are continuous in [0, 1]; later layers are 0 or 1.
            let shade = (activation.clamp(0.0, 1.0) * 255.0) as u8;
            let color = egui::Color32::from_rgb(shade, shade, 0);

            painter.circle_filled(egui::pos2(x, y), 6.0, color);
            painter.circle_stroke(
                egui::pos2(x, y),
                6.0,
                egui::Stroke::new(1.5, egui::Color32::WHITE),
            );

            // Bias ring for hidden and output neurons
            if layer_idx > 0 {
                let bias = levels[layer_idx - 1].biases[neuron_idx];
                let ring = if bias > 0.0 {
                    egui::Color32::YELLOW
                } else {
                    egui::Color32::BLUE
                };
                painter.circle_stroke(egui::pos2(x, y), 8.0, egui::Stroke::new(1.0, ring));
            }

            if is_input_layer {
                painter.text(
                    egui::pos2(x - 14.0, y),
                    egui::Align2::RIGHT_CENTER,
                    format!("Ray {}", neuron_idx),
                    egui::FontId::proportional(9.0),
                    egui::Color32::WHITE,
                );
            } else if is_output_layer {
                painter.text(
                    egui::pos2(x + 14.0, y),
                    egui::Align2::LEFT_CENTER,
                    output_label(neuron_idx, autopilot.mapping),
                    egui::FontId::proportional(9.0),
                    egui::Color32::WHITE,
                );
            }
        }

        let layer_name = if is_input_layer {
            "Input"
        } else if is_output_layer {
            "Output"
        } else {
            "Hidden"
        };

        painter.text(
            egui::pos2(x, rect.bottom() - 5.0),
            egui::Align2::CENTER_BOTTOM,
            layer_name,
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    }
}
