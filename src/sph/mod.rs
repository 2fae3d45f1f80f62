pub use self::error::SimulationError;
pub use self::fluidparticleworld::FluidParticleWorld;
pub use self::messages::*;
pub use self::neighborhood_search::{NeighborQuery, NeighborhoodSearch};
pub use self::parameters::{ForceUnits, SimulationParameters};
pub use self::particles::{Particle, ParticleId, Particles};
pub use self::smoothing_kernel::*;
pub use self::snapshot::Snapshot;
pub use self::solver::*;

mod error;
mod fluidparticleworld;
mod messages;
pub mod morton;
mod neighborhood_search;
mod parameters;
mod particles;
mod smoothing_kernel;
mod snapshot;
mod solver;
