use crate::units::*;

use super::particles::ParticleId;

/// Immutable per-step record a particle publishes for its neighbors.
///
/// Message buffers are id-indexed: the message at slot `i` was emitted by particle `i`.
pub trait ParticleMessage: Copy + Send + Sync {
    fn id(&self) -> ParticleId;
    fn position(&self) -> Point;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocationVelocityMessage {
    pub id: ParticleId,
    pub position: Point,
    pub velocity: Vector,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityPressureMessage {
    pub id: ParticleId,
    pub density: Real,
    pub pressure: Real,
    pub position: Point,
    pub velocity: Vector,
    pub is_static: bool,
}

// Only produced if forces are not stored on the particles directly (unpartitioned variant).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceMessage {
    pub id: ParticleId,
    pub position: Point,
    pub velocity: Vector,
    pub force: Vector,
}

impl ParticleMessage for LocationVelocityMessage {
    #[inline]
    fn id(&self) -> ParticleId {
        self.id
    }
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

impl ParticleMessage for DensityPressureMessage {
    #[inline]
    fn id(&self) -> ParticleId {
        self.id
    }
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

impl ParticleMessage for ForceMessage {
    #[inline]
    fn id(&self) -> ParticleId {
        self.id
    }
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

/// Output buffers of all stages of a single step.
///
/// Each stage clears and refills its own buffer, the next stage only reads it.
/// Allocations are kept around between steps.
#[derive(Default)]
pub struct MessageBoard {
    pub location_velocity: Vec<LocationVelocityMessage>,
    pub density_pressure: Vec<DensityPressureMessage>,
    pub force: Vec<ForceMessage>,
}

impl MessageBoard {
    /// Looks up the force message a particle emitted, relies on buffers being id-indexed.
    pub fn force_message(&self, id: ParticleId) -> Option<&ForceMessage> {
        self.force.get(id.index()).filter(|message| message.id() == id)
    }
}
