//! Simulation parameters with validation and JSON persistence.

use std::path::Path;

use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vehicle::{Handling, OutputMapping};

/// Errors raised when loading or validating parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    /// Reading or writing the settings file failed.
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON for these parameters.
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Simulation parameters that control the road, the population and evolution.
///
/// Missing fields in a settings file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of AI-driven cars per generation.
    pub ai_cars: usize,
    /// Number of traffic cars per generation.
    pub traffic_cars: usize,
    /// Number of lanes on the road.
    pub lanes: usize,
    /// Top speed of AI and keyboard cars.
    pub max_speed: f32,
    /// Top speed of traffic cars.
    pub traffic_speed: f32,
    /// Mutation amount applied to every non-elite network, in `[0, 1]`.
    pub mutation_rate: f32,
    /// Neurons in the hidden level.
    pub hidden_neurons: usize,
    /// Number of sensor rays (network input size).
    pub ray_count: usize,
    /// Length of every sensor ray.
    pub ray_length: f32,
    /// Sensor field of view in radians.
    pub ray_spread: f32,
    /// Car body width.
    pub car_width: f32,
    /// Car body length.
    pub car_height: f32,
    /// Speed gained per tick of throttle.
    pub acceleration: f32,
    /// Speed lost per tick towards zero.
    pub friction: f32,
    /// Heading change per tick of steering, in radians.
    pub steering_rate: f32,
    /// Horizontal centre of the road.
    pub road_center: f32,
    /// Distance between the road borders.
    pub road_width: f32,
    /// Vertical gap between consecutive traffic cars.
    pub traffic_spacing: f32,
    /// Lane the AI cars start in.
    pub ai_start_lane: usize,
    /// Vertical start position of the AI cars.
    pub ai_start_y: f32,
    /// How network outputs become control intents.
    pub output_mapping: OutputMapping,
    /// Adds one keyboard-driven car to the road.
    pub keyboard_car: bool,
    /// Maximum number of generation summaries kept in history.
    pub history_size: usize,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ai_cars: 100,
            traffic_cars: 100,
            lanes: 5,
            max_speed: 3.0,
            traffic_speed: 2.0,
            mutation_rate: 0.1,
            hidden_neurons: 6,
            ray_count: 5,
            ray_length: 150.0,
            ray_spread: std::f32::consts::FRAC_PI_2,
            car_width: 30.0,
            car_height: 50.0,
            acceleration: 0.1,
            friction: 0.05,
            steering_rate: 0.03,
            road_center: 100.0,
            road_width: 180.0,
            traffic_spacing: 150.0,
            ai_start_lane: 1,
            ai_start_y: 100.0,
            output_mapping: OutputMapping::Aliased,
            keyboard_car: false,
            history_size: 500,
            seed: None,
        }
    }
}

impl Params {
    /// Rejects configurations that would produce degenerate geometry or
    /// networks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(bool, &'static str); 14] = [
            (self.ai_cars > 0, "ai_cars must be at least 1"),
            (self.lanes > 0, "lanes must be at least 1"),
            (self.ai_start_lane < self.lanes, "ai_start_lane must be a valid lane"),
            (self.ray_count > 0, "ray_count must be at least 1"),
            (self.ray_length > 0.0, "ray_length must be positive"),
            (self.ray_spread >= 0.0, "ray_spread must not be negative"),
            (self.hidden_neurons > 0, "hidden_neurons must be at least 1"),
            (
                self.car_width > 0.0 && self.car_height > 0.0,
                "car dimensions must be positive",
            ),
            (
                self.max_speed > 0.0 && self.traffic_speed > 0.0,
                "speeds must be positive",
            ),
            (self.acceleration >= 0.0, "acceleration must not be negative"),
            (self.friction >= 0.0, "friction must not be negative"),
            (
                (0.0..=1.0).contains(&self.mutation_rate),
                "mutation_rate must be between 0.0 and 1.0",
            ),
            (self.road_width > 0.0, "road_width must be positive"),
            (self.history_size > 0, "history_size must be at least 1"),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(ConfigError::Invalid(*reason)),
            None => Ok(()),
        }
    }

    /// Driving constants for AI and keyboard cars.
    pub fn handling(&self) -> Handling {
        Handling {
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            friction: self.friction,
            steering_rate: self.steering_rate,
        }
    }

    /// Driving constants for traffic cars.
    pub fn traffic_handling(&self) -> Handling {
        Handling {
            max_speed: self.traffic_speed,
            ..self.handling()
        }
    }

    /// Network layer sizes: rays, hidden level, control signals.
    pub fn layer_sizes(&self) -> [usize; 3] {
        [
            self.ray_count,
            self.hidden_neurons,
            super::brain::CONTROL_SIGNALS,
        ]
    }

    /// Returns the configured RNG, seeded from entropy when no seed is set.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file, filling missing fields with defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
