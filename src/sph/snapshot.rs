use crate::units::Real;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::SimulationError;
use super::parameters::SimulationParameters;
use super::particles::Particle;

/// Recorded state of the entire simulation at a point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: u64,
    pub time: Real,
    pub parameters: SimulationParameters,
    pub particles: Vec<Particle>,
}

impl Snapshot {
    pub fn export_json(&self, path: &Path) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SimulationError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load_json(path: &Path) -> Result<Snapshot, SimulationError> {
        let json = std::fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
