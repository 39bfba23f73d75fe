use chrono::Local;
use evodrive::simulation::params::Params;

#[allow(clippy::struct_excessive_bools)]
pub struct UIState {
    pub stats_panel_width: f32,
    /// Settings being edited; applied on request.
    pub pending_params: Params,
    pub save_requested: bool,
    pub discard_requested: bool,
    pub next_generation_requested: bool,
    pub apply_settings_requested: bool,
    pub status_message: Option<String>,
    pub ticks_per_frame: u32,
    pub paused: bool,
    pub show_network: bool,
}

impl UIState {
    pub fn new(params: &Params) -> Self {
        Self {
            stats_panel_width: 300.0,
            pending_params: params.clone(),
            save_requested: false,
            discard_requested: false,
            next_generation_requested: false,
            apply_settings_requested: false,
            status_message: None,
            ticks_per_frame: 1,
            paused: false,
            show_network: true,
        }
    }

    /// Shows `message` prefixed with the wall-clock time.
    pub fn set_status(&mut self, message: impl AsRef<str>) {
        let time = Local::now().format("%H:%M:%S");
        self.status_message = Some(format!("[{}] {}", time, message.as_ref()));
    }
}
