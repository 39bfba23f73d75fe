//! Feed-forward perceptron network that turns sensor features into controls.
//!
//! The network is a plain stack of [`Level`]s. Evaluation is a pure function
//! of the weights and the input vector; evolution only ever changes weight
//! and bias values, never the topology.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod level;
pub mod persistence;

pub use level::Level;
pub use persistence::{PersistenceError, load_seed};

/// Number of discrete control signals: forward, left, right, reverse.
pub const CONTROL_SIGNALS: usize = 4;

/// Errors raised when building, validating or evaluating a network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The input vector length does not match the first level.
    #[error("input has {actual} values but the network expects {expected}")]
    InputSize {
        /// Input count of the first level.
        expected: usize,
        /// Length of the vector that was supplied.
        actual: usize,
    },
    /// The network has no levels.
    #[error("network must contain at least one level")]
    Empty,
    /// A level has a zero-sized dimension.
    #[error("level {index} has zero-sized dimensions")]
    ZeroSizedLevel {
        /// Position of the level in the stack.
        index: usize,
    },
    /// A level's bias vector does not match its weight matrix.
    #[error("level {index} has {biases} biases for {outputs} outputs")]
    BiasMismatch {
        /// Position of the level in the stack.
        index: usize,
        /// Output count implied by the weight matrix.
        outputs: usize,
        /// Length of the bias vector.
        biases: usize,
    },
    /// A level holds a weight or bias outside `[-1, 1]`.
    #[error("level {index} holds a weight or bias outside [-1, 1]")]
    OutOfRange {
        /// Position of the level in the stack.
        index: usize,
    },
    /// A level does not accept the previous level's outputs.
    #[error("level {index} takes {actual} inputs but the previous level produces {expected}")]
    MismatchedTopology {
        /// Position of the level in the stack.
        index: usize,
        /// Output count of the previous level.
        expected: usize,
        /// Input count of this level.
        actual: usize,
    },
    /// The network does not fit the configured sensor or control layout.
    #[error("network maps {actual_inputs} -> {actual_outputs} but {expected_inputs} -> {expected_outputs} is required")]
    Shape {
        /// Required input count (ray count).
        expected_inputs: usize,
        /// Required output count (control signals).
        expected_outputs: usize,
        /// Input count of the network.
        actual_inputs: usize,
        /// Output count of the network.
        actual_outputs: usize,
    },
    /// Two networks that must share a topology do not.
    #[error("network topologies differ: {left:?} vs {right:?}")]
    TopologyDiffers {
        /// Layer sizes of the first network.
        left: Vec<usize>,
        /// Layer sizes of the second network.
        right: Vec<usize>,
    },
}

/// Layered perceptron controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    levels: Vec<Level>,
}

impl Network {
    /// Creates a network with random weights and biases in `[-1, 1]`.
    ///
    /// # Arguments
    ///
    /// * `layer_sizes` - Neuron count per layer, input layer first
    /// * `rng` - Random source used for every weight and bias
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self, NetworkError> {
        if layer_sizes.len() < 2 {
            return Err(NetworkError::Empty);
        }
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::ZeroSizedLevel {
                index: index.saturating_sub(1),
            });
        }

        let levels = layer_sizes
            .windows(2)
            .map(|pair| Level::new_random(pair[0], pair[1], rng))
            .collect();

        Ok(Self { levels })
    }

    /// Builds a network from existing levels, checking that they chain.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, NetworkError> {
        let network = Self { levels };
        network.validate()?;
        Ok(network)
    }

    /// Checks that the level stack is non-empty, well-formed and chained, and
    /// that every weight and bias lies in `[-1, 1]`.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.levels.is_empty() {
            return Err(NetworkError::Empty);
        }

        let mut previous_outputs: Option<usize> = None;
        for (index, level) in self.levels.iter().enumerate() {
            if level.input_count() == 0 || level.output_count() == 0 {
                return Err(NetworkError::ZeroSizedLevel { index });
            }
            if level.biases.len() != level.output_count() {
                return Err(NetworkError::BiasMismatch {
                    index,
                    outputs: level.output_count(),
                    biases: level.biases.len(),
                });
            }
            if level
                .weights
                .iter()
                .chain(&level.biases)
                .any(|value| !(-1.0..=1.0).contains(value))
            {
                return Err(NetworkError::OutOfRange { index });
            }
            if let Some(expected) = previous_outputs {
                if expected != level.input_count() {
                    return Err(NetworkError::MismatchedTopology {
                        index,
                        expected,
                        actual: level.input_count(),
                    });
                }
            }
            previous_outputs = Some(level.output_count());
        }

        Ok(())
    }

    /// Checks that the network reads `ray_count` features and drives
    /// [`CONTROL_SIGNALS`] outputs.
    pub fn validate_for(&self, ray_count: usize) -> Result<(), NetworkError> {
        self.validate()?;
        if self.input_count() != ray_count || self.output_count() != CONTROL_SIGNALS {
            return Err(NetworkError::Shape {
                expected_inputs: ray_count,
                expected_outputs: CONTROL_SIGNALS,
                actual_inputs: self.input_count(),
                actual_outputs: self.output_count(),
            });
        }
        Ok(())
    }

    /// Returns the levels in evaluation order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of inputs the first level consumes.
    pub fn input_count(&self) -> usize {
        self.levels.first().map_or(0, Level::input_count)
    }

    /// Number of outputs the last level produces.
    pub fn output_count(&self) -> usize {
        self.levels.last().map_or(0, Level::output_count)
    }

    /// Neuron count per layer, input layer first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_count())
            .chain(self.levels.iter().map(Level::output_count))
            .collect()
    }

    /// Runs a forward pass and returns the final output vector.
    #[inline]
    pub fn evaluate(&self, inputs: &Array1<f32>) -> Result<Array1<f32>, NetworkError> {
        self.check_input(inputs)?;
        let mut output = inputs.clone();
        for level in &self.levels {
            output = level.forward(&output);
        }
        Ok(output)
    }

    /// Runs a forward pass and returns every layer's activations, the input
    /// vector first and the final outputs last.
    pub fn activations(&self, inputs: &Array1<f32>) -> Result<Vec<Array1<f32>>, NetworkError> {
        self.check_input(inputs)?;
        let mut layers = Vec::with_capacity(self.levels.len() + 1);
        layers.push(inputs.clone());
        for level in &self.levels {
            let next = level.forward(&layers[layers.len() - 1]);
            layers.push(next);
        }
        Ok(layers)
    }

    /// Mutates every weight and bias in place.
    ///
    /// Each value `v` becomes `v + (r - v) * amount` for a fresh uniform
    /// `r` in `[-1, 1]`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, amount: f32, rng: &mut R) {
        for level in &mut self.levels {
            level.mutate(amount, rng);
        }
    }

    /// Returns a mutated copy, leaving `self` untouched.
    pub fn mutated<R: Rng + ?Sized>(&self, amount: f32, rng: &mut R) -> Self {
        let mut copy = self.clone();
        copy.mutate(amount, rng);
        copy
    }

    /// Checks that `other` has exactly the same layer sizes.
    pub fn ensure_same_topology(&self, other: &Network) -> Result<(), NetworkError> {
        let (left, right) = (self.layer_sizes(), other.layer_sizes());
        if left == right {
            Ok(())
        } else {
            Err(NetworkError::TopologyDiffers { left, right })
        }
    }

    /// Flattens all weights and biases into a single vector.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::new();
        for level in &self.levels {
            flat.extend(level.weights.iter().copied());
            flat.extend(level.biases.iter().copied());
        }
        flat
    }

    fn check_input(&self, inputs: &Array1<f32>) -> Result<(), NetworkError> {
        let expected = self.input_count();
        if inputs.len() == expected {
            Ok(())
        } else {
            Err(NetworkError::InputSize {
                expected,
                actual: inputs.len(),
            })
        }
    }
}
