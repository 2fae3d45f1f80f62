use crate::units::Real;
use thiserror::Error;

use super::particles::ParticleId;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid simulation parameter `{name}` = {value}: {reason}")]
    InvalidParameter { name: &'static str, value: Real, reason: &'static str },

    #[error("failed to read or write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json")]
    Json(#[from] serde_json::Error),

    // Only reachable if the force stage and the integrator disagree on the particle set.
    #[error("no force message for particle {0:?}")]
    MissingForceMessage(ParticleId),
}
