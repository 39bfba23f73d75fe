use std::io::ErrorKind;

use evodrive::simulation::brain;
use evodrive::simulation::params::{ConfigError, Params};
use evodrive::simulation::vehicle::{Car, ControlIntent};
use evodrive::simulation::world::{Simulation, SimulationError};
use macroquad::prelude::*;
use tracing::{error, info, warn};

mod graphics;
mod ui;

const BEST_NETWORK_PATH: &str = "best_network.json";
const SETTINGS_PATH: &str = "settings.json";

fn window_conf() -> Conf {
    Conf {
        window_title: "Self-Driving Cars".to_owned(),
        window_width: 1280,
        window_height: 900,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_settings() -> Params {
    match Params::load_from_file(SETTINGS_PATH) {
        Ok(params) => {
            info!(path = SETTINGS_PATH, "loaded settings");
            params
        }
        Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => Params::default(),
        Err(err) => {
            warn!(%err, path = SETTINGS_PATH, "ignoring settings file");
            Params::default()
        }
    }
}

/// Builds a simulation seeded from the saved network when one fits.
fn start(params: Params) -> Result<Simulation, SimulationError> {
    let seed = brain::load_seed(BEST_NETWORK_PATH, params.ray_count).filter(|network| {
        let fits = network.layer_sizes() == params.layer_sizes();
        if !fits {
            warn!(
                saved = ?network.layer_sizes(),
                configured = ?params.layer_sizes(),
                "saved network does not match the hidden layer size, starting fresh"
            );
        }
        fits
    });
    Simulation::init(params, seed)
}

fn handle_requests(state: &mut ui::UIState, simulation: &mut Simulation) {
    if std::mem::take(&mut state.save_requested) {
        match simulation.best().and_then(Car::network) {
            Some(network) => match network.save_to_file(BEST_NETWORK_PATH) {
                Ok(()) => {
                    info!(path = BEST_NETWORK_PATH, "saved best network");
                    state.set_status("Saved best network");
                }
                Err(err) => {
                    warn!(%err, "failed to save best network");
                    state.set_status(format!("Save failed: {}", err));
                }
            },
            None => state.set_status("No AI car to save"),
        }
    }

    if std::mem::take(&mut state.discard_requested) {
        match std::fs::remove_file(BEST_NETWORK_PATH) {
            Ok(()) => state.set_status("Discarded saved network"),
            Err(err) if err.kind() == ErrorKind::NotFound => state.set_status("No saved network"),
            Err(err) => {
                warn!(%err, "failed to discard saved network");
                state.set_status(format!("Discard failed: {}", err));
            }
        }
    }

    if std::mem::take(&mut state.next_generation_requested) {
        match simulation.reset(None) {
            Ok(()) => state.set_status(format!("Generation {}", simulation.generation())),
            Err(err) => state.set_status(format!("Reset failed: {}", err)),
        }
    }

    if std::mem::take(&mut state.apply_settings_requested) {
        let params = state.pending_params.clone();
        match start(params.clone()) {
            Ok(restarted) => {
                *simulation = restarted;
                if let Err(err) = params.save_to_file(SETTINGS_PATH) {
                    warn!(%err, "failed to save settings");
                }
                state.set_status("Settings applied");
            }
            Err(err) => state.set_status(format!("Invalid settings: {}", err)),
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let params = load_settings();
    let mut ui_state = ui::UIState::new(&params);
    let mut simulation = match start(params) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!(%err, "failed to start simulation");
            return;
        }
    };

    loop {
        clear_background(DARKGRAY);

        if let Some(intent) = simulation.keyboard_intent_mut() {
            *intent = ControlIntent::from_keys(
                is_key_down(KeyCode::Up),
                is_key_down(KeyCode::Left),
                is_key_down(KeyCode::Right),
                is_key_down(KeyCode::Down),
            );
        }

        if !ui_state.paused {
            for _ in 0..ui_state.ticks_per_frame {
                simulation.tick();
            }
        }

        let camera = graphics::follow_camera(&simulation);
        set_camera(&camera);
        graphics::draw_simulation(&simulation, &camera);
        set_default_camera();

        ui::draw_ui(&mut ui_state, &simulation);
        handle_requests(&mut ui_state, &mut simulation);
        ui::process_egui();

        next_frame().await;
    }
}
