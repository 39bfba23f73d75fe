//! Saving and loading trained networks as JSON.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use super::{Network, NetworkError};

/// Errors raised while persisting a network.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the file failed.
    #[error("network file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid network document.
    #[error("network JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but describes an unusable network.
    #[error("stored network is invalid: {0}")]
    Invalid(#[from] NetworkError),
}

impl Network {
    /// Serializes the network to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a network from JSON and checks its topology.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let network: Network = serde_json::from_str(json)?;
        network.validate()?;
        Ok(network)
    }

    /// Saves the network to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Loads a network from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads a network that must read `ray_count` features.
    pub fn load_for(path: impl AsRef<Path>, ray_count: usize) -> Result<Self, PersistenceError> {
        let network = Self::load_from_file(path)?;
        network.validate_for(ray_count)?;
        Ok(network)
    }
}

/// Loads the saved network at `path` for seeding a new population.
///
/// A missing file is not an error. A malformed file, or one sized for a
/// different sensor, is logged and ignored so the caller falls back to fresh
/// random networks.
pub fn load_seed(path: impl AsRef<Path>, ray_count: usize) -> Option<Network> {
    let path = path.as_ref();
    match Network::load_for(path, ray_count) {
        Ok(network) => {
            info!(path = %path.display(), "loaded saved network");
            Some(network)
        }
        Err(PersistenceError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring saved network");
            None
        }
    }
}
