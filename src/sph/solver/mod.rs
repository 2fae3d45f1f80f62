pub use staged::StagedSolver;

pub mod broadcast;
pub mod density_pressure;
pub mod force;
pub mod integrate;
mod staged;

// ------------------------------------------------------

use super::error::SimulationError;
use super::fluidparticleworld::FluidParticleWorld;
use crate::units::*;
use cgmath::prelude::*;
use serde::Serialize;

pub trait Solver {
    // Drops buffers and acceleration structures, e.g. after particles were added or removed.
    fn clear_cached_data(&mut self);

    // performs a single simulation step.
    fn simulation_step(&mut self, fluid_world: &mut FluidParticleWorld) -> Result<StepStatistics, SimulationError>;
}

/// Summary of the particle state after a step.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct StepStatistics {
    pub step: u64,
    pub passed_time: Real,
    pub num_particles: usize,
    pub min_density: Real,
    pub mean_density: Real,
    pub max_density: Real,
    pub max_speed: Real,
    pub num_non_finite: usize,
}

impl StepStatistics {
    pub fn gather(fluid_world: &FluidParticleWorld) -> StepStatistics {
        let particles = &fluid_world.particles;
        let mut statistics = StepStatistics {
            step: fluid_world.num_steps(),
            passed_time: fluid_world.passed_time(),
            num_particles: particles.len(),
            min_density: 0.0,
            mean_density: 0.0,
            max_density: 0.0,
            max_speed: 0.0,
            num_non_finite: 0,
        };
        if particles.is_empty() {
            return statistics;
        }

        // sequential on purpose, the sums don't depend on the thread count that way
        let mut min_density = Real::MAX;
        let mut max_density = Real::MIN;
        let mut density_sum = 0.0;
        let mut max_speed_sq: Real = 0.0;
        for i in 0..particles.len() {
            if !particles.is_finite(i) {
                statistics.num_non_finite += 1;
                continue;
            }
            let density = particles.densities[i];
            min_density = min_density.min(density);
            max_density = max_density.max(density);
            density_sum += density as f64;
            max_speed_sq = max_speed_sq.max(particles.velocities[i].magnitude2());
        }

        let num_finite = particles.len() - statistics.num_non_finite;
        if num_finite > 0 {
            statistics.min_density = min_density;
            statistics.max_density = max_density;
            statistics.mean_density = (density_sum / num_finite as f64) as Real;
            statistics.max_speed = max_speed_sq.sqrt();
        }
        statistics
    }
}
