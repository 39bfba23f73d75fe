//! Simulation context: road, traffic, AI population and generation rollover.
//!
//! Ticks are strictly sequential. Traffic cars move first and ignore
//! obstacles; AI cars then move in population order and see the traffic
//! hulls from this tick. The optional keyboard car moves last.

use std::collections::VecDeque;

use geo::Coord;
use rand::Rng;
use rand::rngs::SmallRng;
use thiserror::Error;
use tracing::{debug, info, trace};

use super::brain::{Network, NetworkError};
use super::evolution::{self, GenerationStats};
use super::params::{ConfigError, Params};
use super::road::Road;
use super::vehicle::{Autopilot, Car, ControlIntent, Driver, Sensor};

/// Errors raised when building or reseeding a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The parameters are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A seed network does not fit the configured population.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// The whole simulation state advanced by [`Simulation::tick`].
#[derive(Debug)]
pub struct Simulation {
    params: Params,
    road: Road,
    traffic: Vec<Car>,
    cars: Vec<Car>,
    keyboard: Option<Car>,
    best: usize,
    generation: u32,
    ticks: u64,
    history: VecDeque<GenerationStats>,
    rng: SmallRng,
}

impl Simulation {
    /// Builds the first generation.
    ///
    /// # Arguments
    ///
    /// * `params` - Validated before anything is built
    /// * `seed_network` - Network to seed the population from, with one
    ///   verbatim copy and mutated copies for the rest; fresh random networks
    ///   are used when `None`
    pub fn init(params: Params, seed_network: Option<Network>) -> Result<Self, SimulationError> {
        params.validate()?;
        if let Some(seed) = &seed_network {
            check_seed(&params, seed)?;
        }

        let road = Road::new(params.road_center, params.road_width, params.lanes);
        let rng = params.rng();
        let mut simulation = Self {
            history: VecDeque::with_capacity(params.history_size),
            params,
            road,
            traffic: Vec::new(),
            cars: Vec::new(),
            keyboard: None,
            best: 0,
            generation: 0,
            ticks: 0,
            rng,
        };
        simulation.populate(seed_network.as_ref())?;

        info!(
            ai_cars = simulation.cars.len(),
            traffic = simulation.traffic.len(),
            seeded = seed_network.is_some(),
            "simulation initialised"
        );
        Ok(simulation)
    }

    /// Advances every car by one tick.
    pub fn tick(&mut self) {
        let borders = self.road.borders();

        for car in &mut self.traffic {
            car.tick(borders, &[]);
        }
        for car in &mut self.cars {
            car.tick(borders, &self.traffic);
        }
        if let Some(car) = &mut self.keyboard {
            car.tick(borders, &self.traffic);
        }

        if let Some(best) = evolution::select_best(&self.cars) {
            self.best = best;
        }
        self.ticks += 1;
        trace!(tick = self.ticks, best = self.best, "tick");
    }

    /// Starts the next generation.
    ///
    /// The finished generation is summarised into the history, every car is
    /// rebuilt, and the AI networks are seeded from `seed_network` or, when
    /// `None`, from the current best car. A seed that does not match the
    /// configured layer sizes is rejected before anything changes.
    pub fn reset(&mut self, seed_network: Option<Network>) -> Result<(), SimulationError> {
        let seed = match seed_network {
            Some(network) => {
                check_seed(&self.params, &network)?;
                Some(network)
            }
            None => self.best().and_then(Car::network).cloned(),
        };

        let stats = self.stats();
        info!(
            generation = stats.generation,
            ticks = stats.ticks,
            best_progress = stats.best_progress,
            damaged = stats.damaged,
            "generation finished"
        );
        if self.history.len() == self.params.history_size {
            self.history.pop_front();
        }
        self.history.push_back(stats);

        self.generation += 1;
        self.ticks = 0;
        self.populate(seed.as_ref())
    }

    /// Summary of the running generation.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            ticks: self.ticks,
            best_progress: self.best_progress(),
            damaged: self.cars.iter().filter(|car| car.is_damaged()).count(),
            population: self.cars.len(),
        }
    }

    /// Distance the best car has travelled up the road.
    pub fn best_progress(&self) -> f32 {
        self.best().map_or(0.0, |car| self.params.ai_start_y - car.pos.y)
    }

    /// The best AI car.
    pub fn best(&self) -> Option<&Car> {
        self.cars.get(self.best)
    }

    /// Index of the best AI car in [`Simulation::cars`].
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// AI cars in population order.
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Traffic cars in tick order.
    pub fn traffic(&self) -> &[Car] {
        &self.traffic
    }

    /// The keyboard car, if enabled.
    pub fn keyboard_car(&self) -> Option<&Car> {
        self.keyboard.as_ref()
    }

    /// Intents of the keyboard car, for the input layer to overwrite.
    pub fn keyboard_intent_mut(&mut self) -> Option<&mut ControlIntent> {
        self.keyboard.as_mut().map(|car| &mut car.controls)
    }

    /// The road.
    pub fn road(&self) -> &Road {
        &self.road
    }

    /// Parameters the simulation was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current generation number.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks since the current generation started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Summaries of finished generations, oldest first.
    pub fn history(&self) -> &VecDeque<GenerationStats> {
        &self.history
    }

    /// Rebuilds traffic, the AI population and the keyboard car.
    fn populate(&mut self, seed: Option<&Network>) -> Result<(), SimulationError> {
        let params = &self.params;
        let road = &self.road;
        let rng = &mut self.rng;

        self.traffic = (0..params.traffic_cars)
            .map(|i| {
                let lane = rng.random_range(0..params.lanes);
                let pos = Coord {
                    x: road.lane_center(lane),
                    y: -params.traffic_spacing * (i + 1) as f32,
                };
                Car::dummy(pos, params.car_width, params.car_height, params.traffic_handling())
            })
            .collect();

        let start = Coord {
            x: road.lane_center(params.ai_start_lane),
            y: params.ai_start_y,
        };
        self.cars = (0..params.ai_cars)
            .map(|_| -> Result<Car, NetworkError> {
                let network = Network::new(&params.layer_sizes(), rng)?;
                let autopilot = Autopilot::new(new_sensor(params), network, params.output_mapping)?;
                Ok(Car::new(
                    start,
                    params.car_width,
                    params.car_height,
                    params.handling(),
                    Driver::Ai(autopilot),
                ))
            })
            .collect::<Result<_, _>>()?;

        self.keyboard = params.keyboard_car.then(|| {
            Car::new(
                start,
                params.car_width,
                params.car_height,
                params.handling(),
                Driver::Keyboard {
                    sensor: new_sensor(params),
                },
            )
        });

        if let Some(seed) = seed {
            evolution::seed_population(&mut self.cars, seed, params.mutation_rate, rng)?;
            debug!(layers = ?seed.layer_sizes(), "population seeded");
        }
        self.best = 0;
        Ok(())
    }
}

/// A seed must match the configured layer sizes exactly, hidden level included.
fn check_seed(params: &Params, seed: &Network) -> Result<(), NetworkError> {
    seed.validate_for(params.ray_count)?;
    let (expected, actual) = (params.layer_sizes().to_vec(), seed.layer_sizes());
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::TopologyDiffers {
            left: expected,
            right: actual,
        })
    }
}

fn new_sensor(params: &Params) -> Sensor {
    Sensor::new(params.ray_count, params.ray_length, params.ray_spread)
}
