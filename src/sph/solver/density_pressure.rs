use crate::units::*;
use rayon::prelude::*;

use super::super::messages::{DensityPressureMessage, LocationVelocityMessage};
use super::super::neighborhood_search::NeighborQuery;
use super::super::parameters::SimulationParameters;
use super::super::particles::Particles;
use super::super::smoothing_kernel::Kernel;

// Equation of State (EOS)
// Linear in the density deviation, no tensile pressure.
#[inline]
pub fn pressure(parameters: &SimulationParameters, density: Real) -> Real {
    (parameters.pressure_coefficient * (density - parameters.rest_density)).max(0.0)
}

/// Estimates density and pressure of every particle from the location messages of its neighbors.
///
/// The particle's own message is skipped, an isolated particle ends up at the density floor.
/// Results are stored on the particles and published as density/pressure messages.
pub fn compute_density_pressure(
    parameters: &SimulationParameters,
    kernel: &(impl Kernel + Sync),
    neighbors: NeighborQuery,
    location_velocity_messages: &[LocationVelocityMessage],
    particles: &mut Particles,
    density_pressure_messages: &mut Vec<DensityPressureMessage>,
) {
    microprofile::scope!("StagedSolver", "compute_density_pressure");

    let mass = parameters.particle_mass;
    let smoothing_length = parameters.smoothing_length;
    let has_static_particles = parameters.has_static_particles;

    let Particles {
        ids,
        positions,
        velocities,
        densities,
        pressures,
        is_static,
        ..
    } = particles;

    density_pressure_messages.clear();
    density_pressure_messages.par_extend(
        (densities, pressures, &*ids, &*positions, &*velocities, &*is_static)
            .into_par_iter()
            .map(|(density, pressure_i, &id, &ri, &vi, &is_static)| {
                let mut accumulated = 0.0;
                neighbors.foreach_neighbor_message(
                    location_velocity_messages,
                    id,
                    ri,
                    smoothing_length,
                    #[inline(always)]
                    |_, _, r_sq| accumulated += mass * kernel.evaluate(r_sq, r_sq.sqrt()),
                );

                *density = accumulated.max(parameters.min_density).min(parameters.max_density);
                *pressure_i = pressure(parameters, *density);

                DensityPressureMessage {
                    id,
                    density: *density,
                    pressure: *pressure_i,
                    position: ri,
                    velocity: vi,
                    is_static: has_static_particles && is_static,
                }
            }),
    );
}
