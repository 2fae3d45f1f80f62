use crate::units::*;
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable identifier of a particle, equal to its slot in [`Particles`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

impl ParticleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Copy of a single particle's state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Point,
    pub velocity: Vector,
    pub density: Real,
    pub pressure: Real,
    pub force: Vector,
    pub is_static: bool,
}

/// Struct-of-arrays particle storage.
///
/// Every vector has the same length, slot `i` belongs to the particle with id `i`.
#[derive(Default, Clone)]
pub struct Particles {
    pub ids: Vec<ParticleId>,
    pub positions: Vec<Point>,
    pub velocities: Vec<Vector>,
    pub densities: Vec<Real>, // Local densities ρ, written by the density stage
    pub pressures: Vec<Real>, // written by the density stage
    pub forces: Vec<Vector>,  // net force of the last force stage
    pub is_static: Vec<bool>, // immovable particles, e.g. boundaries. Only honored if the parameters ask for it.
}

impl Particles {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn num_static_particles(&self) -> usize {
        self.is_static.iter().filter(|s| **s).count()
    }

    pub fn push(&mut self, position: Point, velocity: Vector, is_static: bool) -> ParticleId {
        let id = ParticleId(self.len() as u32);
        self.ids.push(id);
        self.positions.push(position);
        self.velocities.push(velocity);
        self.densities.push(0.0);
        self.pressures.push(0.0);
        self.forces.push(Vector::zero());
        self.is_static.push(is_static);
        id
    }

    pub fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.positions.reserve(additional);
        self.velocities.reserve(additional);
        self.densities.reserve(additional);
        self.pressures.reserve(additional);
        self.forces.reserve(additional);
        self.is_static.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.positions.clear();
        self.velocities.clear();
        self.densities.clear();
        self.pressures.clear();
        self.forces.clear();
        self.is_static.clear();
    }

    pub fn get(&self, id: ParticleId) -> Option<Particle> {
        let i = id.index();
        if i >= self.len() {
            return None;
        }
        Some(Particle {
            id: self.ids[i],
            position: self.positions[i],
            velocity: self.velocities[i],
            density: self.densities[i],
            pressure: self.pressures[i],
            force: self.forces[i],
            is_static: self.is_static[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.ids.iter().filter_map(move |id| self.get(*id))
    }

    /// Whether position, velocity, density, pressure and force of the slot are all finite.
    pub fn is_finite(&self, i: usize) -> bool {
        let p = self.positions[i];
        let v = self.velocities[i];
        let f = self.forces[i];
        p.x.is_finite()
            && p.y.is_finite()
            && p.z.is_finite()
            && v.x.is_finite()
            && v.y.is_finite()
            && v.z.is_finite()
            && f.x.is_finite()
            && f.y.is_finite()
            && f.z.is_finite()
            && self.densities[i].is_finite()
            && self.pressures[i].is_finite()
    }
}
