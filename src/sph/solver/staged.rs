use crate::units::Real;

use super::super::error::SimulationError;
use super::super::fluidparticleworld::FluidParticleWorld;
use super::super::messages::MessageBoard;
use super::super::neighborhood_search::{NeighborQuery, NeighborhoodSearch};
use super::super::smoothing_kernel::SmoothingKernels;
use super::broadcast::broadcast_state;
use super::density_pressure::compute_density_pressure;
use super::force::accumulate_forces;
use super::integrate::integrate;
use super::{Solver, StepStatistics};

/// Runs the four stages (state broadcast, density & pressure, forces, integration) once per step.
///
/// Every stage is a parallel pass over all particles that only reads the messages of the previous stage,
/// finishing the pass is the barrier before the next stage starts.
#[derive(Default)]
pub struct StagedSolver {
    messages: MessageBoard,
    neighborhood_search: Option<NeighborhoodSearch>,
    reported_non_finite: bool,
}

impl StagedSolver {
    pub fn new() -> StagedSolver {
        Default::default()
    }

    pub fn messages(&self) -> &MessageBoard {
        &self.messages
    }

    fn neighborhood_search(&mut self, radius: Real) -> &mut NeighborhoodSearch {
        if let Some(search) = &self.neighborhood_search {
            if search.radius() != radius {
                self.neighborhood_search = None;
            }
        }
        self.neighborhood_search.get_or_insert_with(|| NeighborhoodSearch::new(radius))
    }
}

impl Solver for StagedSolver {
    fn clear_cached_data(&mut self) {
        self.messages = Default::default();
        self.neighborhood_search = None;
        self.reported_non_finite = false;
    }

    fn simulation_step(&mut self, fluid_world: &mut FluidParticleWorld) -> Result<StepStatistics, SimulationError> {
        microprofile::scope!("StagedSolver", "simulation_step");

        let parameters = fluid_world.parameters().clone();
        let kernels = SmoothingKernels::new(&parameters);

        // positions are final after the last integration, so one rebuild serves both neighbor stages
        if parameters.uses_spatial_partition {
            self.neighborhood_search(parameters.smoothing_length)
                .update(&fluid_world.particles.positions);
        }
        let neighbors = match &self.neighborhood_search {
            Some(search) if parameters.uses_spatial_partition => NeighborQuery::Partitioned(search),
            _ => NeighborQuery::BruteForce,
        };

        let messages = &mut self.messages;
        let particles = &mut fluid_world.particles;
        broadcast_state(particles, &mut messages.location_velocity);
        compute_density_pressure(
            &parameters,
            &kernels.density,
            neighbors,
            &messages.location_velocity,
            particles,
            &mut messages.density_pressure,
        );
        accumulate_forces(
            &parameters,
            &kernels,
            neighbors,
            &messages.density_pressure,
            particles,
            &mut messages.force,
        );
        integrate(&parameters, particles, messages)?;

        fluid_world.advance_time();

        let statistics = StepStatistics::gather(fluid_world);
        tracing::debug!(?statistics, "simulation step");
        if statistics.num_non_finite > 0 && !self.reported_non_finite {
            tracing::warn!(
                step = statistics.step,
                num_non_finite = statistics.num_non_finite,
                "particle state is no longer finite"
            );
            self.reported_non_finite = true;
        }
        Ok(statistics)
    }
}
