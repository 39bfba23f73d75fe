//! Car state, per-tick kinematics and damage detection.
//!
//! A tick runs in a fixed order:
//! 1. integrate speed, heading and position from the current intents
//! 2. rebuild the hull from the new pose
//! 3. test the hull against the road borders and traffic hulls
//! 4. sense, infer and store the intents for the *next* tick (AI only)

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::brain::{Network, NetworkError};
use super::super::geometry::{Hull, Point, Segment};
use super::controls::{ControlIntent, OutputMapping};
use super::sensor::Sensor;

/// Scalar driving model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handling {
    /// Forward speed cap. Reverse is capped at half of it.
    pub max_speed: f32,
    /// Speed gained (or lost when reversing) per tick of throttle.
    pub acceleration: f32,
    /// Speed lost per tick towards zero.
    pub friction: f32,
    /// Heading change per tick of steering, in radians.
    pub steering_rate: f32,
}

impl Default for Handling {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            acceleration: 0.1,
            friction: 0.05,
            steering_rate: 0.03,
        }
    }
}

/// Which control source a car uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Driven from the keyboard.
    Keyboard,
    /// Always drives straight ahead.
    Dummy,
    /// Driven by a network reading the sensor.
    Ai,
}

/// Sensor and network of an AI-driven car.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Distance sensor feeding the network.
    pub sensor: Sensor,
    /// Controller network.
    pub network: Network,
    /// How network outputs become intents.
    pub mapping: OutputMapping,
    activations: Vec<Array1<f32>>,
}

impl Autopilot {
    /// Pairs a sensor with a network whose input size matches the ray count.
    pub fn new(sensor: Sensor, network: Network, mapping: OutputMapping) -> Result<Self, NetworkError> {
        network.validate_for(sensor.ray_count())?;
        Ok(Self {
            sensor,
            network,
            mapping,
            activations: Vec::new(),
        })
    }

    /// Layer activations from the last inference, input layer first.
    pub fn activations(&self) -> &[Array1<f32>] {
        &self.activations
    }
}

/// Control source plus the equipment it needs.
#[derive(Debug, Clone)]
pub enum Driver {
    /// Keyboard control; the sensor runs for display only.
    Keyboard {
        /// Distance sensor.
        sensor: Sensor,
    },
    /// Permanent forward intent, no sensor.
    Dummy,
    /// Sensor and network steer the car.
    Ai(Autopilot),
}

impl Driver {
    /// The control mode tag.
    pub fn mode(&self) -> ControlMode {
        match self {
            Driver::Keyboard { .. } => ControlMode::Keyboard,
            Driver::Dummy => ControlMode::Dummy,
            Driver::Ai(_) => ControlMode::Ai,
        }
    }
}

/// A car on the road.
#[derive(Debug, Clone)]
pub struct Car {
    /// Centre position.
    pub pos: Point,
    /// Heading in radians; `0` faces up the road.
    pub heading: f32,
    /// Signed scalar speed; negative while reversing.
    pub speed: f32,
    /// Body width.
    pub width: f32,
    /// Body length.
    pub height: f32,
    /// Driving model constants.
    pub handling: Handling,
    /// Intents applied on the next tick.
    pub controls: ControlIntent,
    hull: Hull,
    damaged: bool,
    driver: Driver,
}

impl Car {
    /// Creates a car at rest facing up the road.
    ///
    /// # Arguments
    ///
    /// * `pos` - Centre position
    /// * `width` - Body width
    /// * `height` - Body length
    /// * `handling` - Driving model constants
    /// * `driver` - Control source
    pub fn new(pos: Point, width: f32, height: f32, handling: Handling, driver: Driver) -> Self {
        let controls = match driver {
            Driver::Dummy => ControlIntent::dummy(),
            Driver::Keyboard { .. } | Driver::Ai(_) => ControlIntent::default(),
        };
        Self {
            pos,
            heading: 0.0,
            speed: 0.0,
            width,
            height,
            handling,
            controls,
            hull: Hull::new(pos, 0.0, width, height),
            damaged: false,
            driver,
        }
    }

    /// Creates a traffic car that always drives forward.
    pub fn dummy(pos: Point, width: f32, height: f32, handling: Handling) -> Self {
        Self::new(pos, width, height, handling, Driver::Dummy)
    }

    /// Hull from the last tick (or from construction).
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    /// Whether the car has collided this generation.
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Control source.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Control mode tag.
    pub fn mode(&self) -> ControlMode {
        self.driver.mode()
    }

    /// The car's sensor, if it has one.
    pub fn sensor(&self) -> Option<&Sensor> {
        match &self.driver {
            Driver::Keyboard { sensor } => Some(sensor),
            Driver::Ai(autopilot) => Some(&autopilot.sensor),
            Driver::Dummy => None,
        }
    }

    /// The car's autopilot, if AI-driven.
    pub fn autopilot(&self) -> Option<&Autopilot> {
        match &self.driver {
            Driver::Ai(autopilot) => Some(autopilot),
            _ => None,
        }
    }

    /// The controller network, if AI-driven.
    pub fn network(&self) -> Option<&Network> {
        self.autopilot().map(|autopilot| &autopilot.network)
    }

    /// Mutable access to the controller network, if AI-driven.
    pub fn network_mut(&mut self) -> Option<&mut Network> {
        match &mut self.driver {
            Driver::Ai(autopilot) => Some(&mut autopilot.network),
            _ => None,
        }
    }

    /// Moves the car to `pos` and rebuilds its hull.
    pub fn place(&mut self, pos: Point) {
        self.pos = pos;
        self.hull = Hull::new(self.pos, self.heading, self.width, self.height);
    }

    /// Advances the car by one tick.
    ///
    /// # Arguments
    ///
    /// * `borders` - Road border segments
    /// * `traffic` - Other cars to collide with and sense; never includes `self`
    pub fn tick(&mut self, borders: &[Segment], traffic: &[Car]) {
        self.drive();
        self.hull = Hull::new(self.pos, self.heading, self.width, self.height);
        if !self.damaged {
            self.damaged = self.collides(borders, traffic);
        }

        let obstacles = traffic.iter().map(Car::hull);
        match &mut self.driver {
            Driver::Dummy => {}
            Driver::Keyboard { sensor } => {
                sensor.update(self.pos, self.heading, borders, obstacles);
            }
            Driver::Ai(autopilot) => {
                autopilot
                    .sensor
                    .update(self.pos, self.heading, borders, obstacles);
                match autopilot.network.activations(&autopilot.sensor.features()) {
                    Ok(layers) => {
                        if let Some(outputs) = layers.last() {
                            self.controls = autopilot.mapping.apply(outputs);
                        }
                        autopilot.activations = layers;
                    }
                    Err(err) => warn!(%err, "skipping inference"),
                }
            }
        }
    }

    fn collides(&self, borders: &[Segment], traffic: &[Car]) -> bool {
        borders.iter().any(|border| self.hull.touches(border))
            || traffic.iter().any(|other| self.hull.intersects(&other.hull))
    }

    fn drive(&mut self) {
        let Handling {
            max_speed,
            acceleration,
            friction,
            steering_rate,
        } = self.handling;

        if self.controls.forward {
            self.speed += acceleration;
        }
        if self.controls.reverse {
            self.speed -= acceleration;
        }
        self.speed = self.speed.clamp(-max_speed / 2.0, max_speed);

        if self.speed > 0.0 {
            self.speed -= friction;
        } else if self.speed < 0.0 {
            self.speed += friction;
        }
        if self.speed.abs() < friction {
            self.speed = 0.0;
        }

        if self.speed != 0.0 {
            let flip = self.speed.signum();
            if self.controls.left {
                self.heading += steering_rate * flip;
            }
            if self.controls.right {
                self.heading -= steering_rate * flip;
            }
        }

        self.pos.x -= self.heading.sin() * self.speed;
        self.pos.y -= self.heading.cos() * self.speed;
    }
}
