//! A single fully-connected perceptron level with a step activation.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One layer of the controller network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Weight matrix (`input_count` × `output_count`), each entry in `[-1, 1]`.
    pub weights: Array2<f32>,
    /// Bias vector (`output_count`), each entry in `[-1, 1]`.
    pub biases: Array1<f32>,
}

impl Level {
    /// Creates a new level with weights and biases drawn uniformly from `[-1, 1]`.
    pub fn new_random<R: Rng + ?Sized>(input_count: usize, output_count: usize, rng: &mut R) -> Self {
        Self {
            weights: Array2::from_shape_fn((input_count, output_count), |_| {
                rng.random_range(-1.0..=1.0)
            }),
            biases: Array1::from_shape_fn(output_count, |_| rng.random_range(-1.0..=1.0)),
        }
    }

    /// Number of inputs this level consumes.
    pub fn input_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of outputs this level produces.
    pub fn output_count(&self) -> usize {
        self.weights.ncols()
    }

    /// Performs a forward pass.
    ///
    /// Each output neuron fires (`1.0`) when its weighted input sum plus bias
    /// is strictly positive, otherwise it stays at `0.0`.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.dot(&self.weights);
        output += &self.biases;
        output.mapv_inplace(|sum| if sum > 0.0 { 1.0 } else { 0.0 });
        output
    }

    /// Pulls every weight and bias towards a fresh uniform value in `[-1, 1]`.
    ///
    /// `amount = 0` leaves the level untouched, `amount = 1` replaces every
    /// value outright.
    pub fn mutate<R: Rng + ?Sized>(&mut self, amount: f32, rng: &mut R) {
        if amount <= 0.0 {
            return;
        }
        let mut nudge = |value: &mut f32| {
            let target: f32 = rng.random_range(-1.0..=1.0);
            *value = (*value + (target - *value) * amount).clamp(-1.0, 1.0);
        };
        self.weights.iter_mut().for_each(&mut nudge);
        self.biases.iter_mut().for_each(&mut nudge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn step_activation_is_strict() {
        let level = Level {
            weights: array![[1.0], [1.0]],
            biases: array![-2.0],
        };
        // Sum plus bias is exactly zero, which does not fire.
        assert_eq!(level.forward(&array![1.0, 1.0]), array![0.0]);
        assert_eq!(level.forward(&array![1.0, 1.5]), array![1.0]);
    }
}
