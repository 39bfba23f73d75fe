//! Cars, their control intents and their distance sensor.

mod car;
mod controls;
mod sensor;

pub use car::{Autopilot, Car, ControlMode, Driver, Handling};
pub use controls::{ControlIntent, OutputMapping};
pub use sensor::Sensor;
