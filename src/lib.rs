//! # Evodrive - Neuroevolution of Self-Driving Cars
//!
//! A population of cars learns to drive down a multi-lane road full of slower
//! traffic. Every car reads a fan of distance rays into a small perceptron
//! network whose outputs become its driving controls. After each generation
//! the car that got furthest becomes the parent of the next one.
//!
//! ## Features
//!
//! - Segment and polygon intersection on `geo` primitives
//! - Ray sensor with normalised distance readings
//! - Feed-forward network with step activation and blend mutation
//! - Friction and steering kinematics with sticky collision damage
//! - Elitist reseeding from the best car or a saved network
//! - Real-time visualization with egui/macroquad
//! - JSON persistence of the best network and of the settings
//!
//! ## Core Modules
//!
//! - [`simulation::geometry`] - Segment intersection and car hulls
//! - [`simulation::vehicle`] - Cars, sensors and control intents
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::evolution`] - Selection and reseeding
//! - [`simulation::world`] - Main simulation loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Feed-forward perceptron network and its persistence.
    pub mod brain;
    /// Best-car selection and population reseeding.
    pub mod evolution;
    /// Segment intersection, interpolation and car hulls.
    pub mod geometry;
    /// Simulation parameters.
    pub mod params;
    /// Road borders and lane layout.
    pub mod road;
    /// Cars, their sensors and control intents.
    ///
    /// A [`vehicle::Car`] is driven by a [`vehicle::Driver`]: the keyboard,
    /// a constant forward intent for traffic, or an [`vehicle::Autopilot`].
    pub mod vehicle;
    /// Simulation context that owns the road and every car.
    pub mod world;
}
