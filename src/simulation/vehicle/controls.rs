//! Control intents and the mapping from network outputs to them.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// The four discrete driving commands applied on a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlIntent {
    /// Accelerate.
    pub forward: bool,
    /// Steer left.
    pub left: bool,
    /// Steer right.
    pub right: bool,
    /// Brake / reverse.
    pub reverse: bool,
}

impl ControlIntent {
    /// The permanent intent of traffic cars: full throttle, no steering.
    pub fn dummy() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    /// Builds an intent from the state of four direction keys.
    pub fn from_keys(up: bool, left: bool, right: bool, down: bool) -> Self {
        Self {
            forward: up,
            left,
            right,
            reverse: down,
        }
    }
}

/// How a network output vector is turned into a [`ControlIntent`].
///
/// An output neuron counts as "on" when its activation is positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMapping {
    /// Output 0 drives `forward`; output 1 drives `left`, `right` and
    /// `reverse` together. Outputs 2 and 3 are ignored.
    #[default]
    Aliased,
    /// Outputs 0..=3 drive `forward`, `left`, `right` and `reverse`.
    Independent,
}

impl OutputMapping {
    /// Maps a network output vector onto control intents.
    ///
    /// Missing outputs read as "off".
    pub fn apply(self, outputs: &Array1<f32>) -> ControlIntent {
        let on = |index: usize| outputs.get(index).is_some_and(|&value| value > 0.0);
        match self {
            OutputMapping::Aliased => {
                let steer = on(1);
                ControlIntent {
                    forward: on(0),
                    left: steer,
                    right: steer,
                    reverse: steer,
                }
            }
            OutputMapping::Independent => ControlIntent {
                forward: on(0),
                left: on(1),
                right: on(2),
                reverse: on(3),
            },
        }
    }
}
