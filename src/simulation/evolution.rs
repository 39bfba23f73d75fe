//! Selection and reseeding of the AI population between generations.
//!
//! The best car is the one furthest up the road. A new generation copies its
//! network into every AI car: the first car keeps it verbatim and every other
//! car receives a mutated copy.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brain::{Network, NetworkError};
use super::vehicle::{Car, ControlMode};

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0.
    pub generation: u32,
    /// Ticks the generation ran for.
    pub ticks: u64,
    /// Distance the best car travelled up the road.
    pub best_progress: f32,
    /// Number of AI cars damaged when the generation ended.
    pub damaged: usize,
    /// Number of AI cars in the generation.
    pub population: usize,
}

/// Returns the index of the AI car with the smallest `y`.
///
/// Damaged cars are not excluded. On a tie the earliest car wins. Returns
/// `None` when there is no AI car.
pub fn select_best(cars: &[Car]) -> Option<usize> {
    cars.iter()
        .enumerate()
        .filter(|(_, car)| car.mode() == ControlMode::Ai)
        .fold(None, |best: Option<(usize, f32)>, (index, car)| match best {
            Some((_, y)) if y <= car.pos.y => best,
            _ => Some((index, car.pos.y)),
        })
        .map(|(index, _)| index)
}

/// Seeds every AI car's network from `best`.
///
/// The first AI car receives an exact copy; every later one receives a copy
/// mutated by `mutation_rate`. Cars without a network are skipped.
///
/// # Arguments
///
/// * `cars` - Population to reseed, in population order
/// * `best` - Network to copy
/// * `mutation_rate` - Mutation amount for every non-elite copy
/// * `rng` - Random source for mutation
pub fn seed_population<R: Rng + ?Sized>(
    cars: &mut [Car],
    best: &Network,
    mutation_rate: f32,
    rng: &mut R,
) -> Result<(), NetworkError> {
    let mut elite_placed = false;
    for network in cars.iter_mut().filter_map(Car::network_mut) {
        network.ensure_same_topology(best)?;
        *network = if elite_placed {
            best.mutated(mutation_rate, rng)
        } else {
            elite_placed = true;
            best.clone()
        };
    }
    Ok(())
}
