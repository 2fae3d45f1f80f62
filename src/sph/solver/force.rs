use crate::units::*;
use cgmath::prelude::*;
use rayon::prelude::*;

use super::super::messages::{DensityPressureMessage, ForceMessage};
use super::super::neighborhood_search::NeighborQuery;
use super::super::parameters::SimulationParameters;
use super::super::particles::Particles;
use super::super::smoothing_kernel::{Kernel, SmoothingKernels};

/// Sums pressure, viscosity and (optionally) cohesion contributions of all neighbors.
///
/// With the spatial partition the result is written to the particles, otherwise every particle
/// publishes a force message that the integrator picks up by id.
pub fn accumulate_forces(
    parameters: &SimulationParameters,
    kernels: &SmoothingKernels,
    neighbors: NeighborQuery,
    density_pressure_messages: &[DensityPressureMessage],
    particles: &mut Particles,
    force_messages: &mut Vec<ForceMessage>,
) {
    microprofile::scope!("StagedSolver", "accumulate_forces");

    let Particles {
        ids,
        positions,
        velocities,
        pressures,
        forces,
        ..
    } = particles;

    let compute_force = |id, ri: Point, vi: Vector, pressure_i: Real| -> Vector {
        let mut force = Vector::zero();
        neighbors.foreach_neighbor_message(
            density_pressure_messages,
            id,
            ri,
            parameters.smoothing_length,
            #[inline(always)]
            |message, ri_to_rj, r_sq| force += pair_force(parameters, kernels, vi, pressure_i, message, ri_to_rj, r_sq),
        );
        force
    };

    force_messages.clear();
    if parameters.uses_spatial_partition {
        forces
            .par_iter_mut()
            .zip((&*ids, &*positions, &*velocities, &*pressures).into_par_iter())
            .for_each(|(force, (&id, &ri, &vi, &pressure_i))| *force = compute_force(id, ri, vi, pressure_i));
    } else {
        force_messages.par_extend((forces, &*ids, &*positions, &*velocities, &*pressures).into_par_iter().map(
            |(force, &id, &ri, &vi, &pressure_i)| {
                *force = compute_force(id, ri, vi, pressure_i);
                ForceMessage {
                    id,
                    position: ri,
                    velocity: vi,
                    force: *force,
                }
            },
        ));
    }
}

// Contribution of a single neighbor message within the smoothing length.
#[inline]
fn pair_force(
    parameters: &SimulationParameters,
    kernels: &SmoothingKernels,
    vi: Vector,
    pressure_i: Real,
    message: &DensityPressureMessage,
    ri_to_rj: Vector,
    r_sq: Real,
) -> Vector {
    let r = r_sq.sqrt();
    let mass = parameters.particle_mass;

    // pressure, symmetrized over both particles
    let pressure_weight = mass * (pressure_i + message.pressure) / (2.0 * message.density);
    let mut force = kernels.pressure.gradient(ri_to_rj, r_sq, r) * pressure_weight;

    // viscosity, static neighbors don't drag
    if !message.is_static {
        force += (message.velocity - vi) * (kernels.viscosity.laplacian(r) * parameters.viscosity * mass);
    }

    if parameters.surface_tension > 0.0 {
        force += ri_to_rj * (parameters.surface_tension * kernels.cohesion.evaluate(r));
    }

    force
}

#[cfg(test)]
mod tests {
    use super::super::broadcast::broadcast_state;
    use super::super::density_pressure::compute_density_pressure;
    use super::*;
    use crate::sph::neighborhood_search::NeighborhoodSearch;
    use more_asserts::*;

    fn run(parameters: &SimulationParameters, particles: &mut Particles) -> Vec<ForceMessage> {
        let kernels = SmoothingKernels::new(parameters);
        let mut search = NeighborhoodSearch::new(parameters.smoothing_length);
        search.update(&particles.positions);
        let neighbors = if parameters.uses_spatial_partition {
            NeighborQuery::Partitioned(&search)
        } else {
            NeighborQuery::BruteForce
        };

        let mut location_velocity = Vec::new();
        let mut density_pressure = Vec::new();
        let mut force = Vec::new();
        broadcast_state(particles, &mut location_velocity);
        compute_density_pressure(parameters, &kernels.density, neighbors, &location_velocity, particles, &mut density_pressure);
        accumulate_forces(parameters, &kernels, neighbors, &density_pressure, particles, &mut force);
        force
    }

    fn compressed_block(spacing_factor: Real, parameters: &SimulationParameters) -> Particles {
        let spacing = parameters.rest_spacing() * spacing_factor;
        let mut particles = Particles::default();
        for z in 0..5 {
            for y in 0..5 {
                for x in 0..5 {
                    particles.push(Point::new(x as Real, y as Real, z as Real) * spacing, Vector::zero(), false);
                }
            }
        }
        particles
    }

    #[test]
    fn neighbors_beyond_smoothing_length_have_no_influence() {
        let parameters = SimulationParameters::default();
        let mut particles = Particles::default();
        particles.push(Point::new(0.0, 0.0, 0.0), Vector::new(1.0, 0.0, 0.0), false);
        particles.push(Point::new(parameters.smoothing_length * 1.01, 0.0, 0.0), Vector::new(-1.0, 0.0, 0.0), false);

        run(&parameters, &mut particles);
        assert_eq!(particles.forces[0], Vector::zero());
        assert_eq!(particles.forces[1], Vector::zero());
    }

    #[test]
    fn compressed_fluid_pushes_outwards() {
        let parameters = SimulationParameters::default();
        let mut particles = compressed_block(0.6, &parameters);
        run(&parameters, &mut particles);

        // corner particle 0 is pushed away from the block, the opposite corner too
        let first = particles.forces[0];
        let last = particles.forces[particles.len() - 1];
        assert_lt!(first.x, 0.0);
        assert_lt!(first.y, 0.0);
        assert_lt!(first.z, 0.0);
        assert_gt!(last.x, 0.0);
        assert_gt!(last.y, 0.0);
        assert_gt!(last.z, 0.0);
    }

    #[test]
    fn pairwise_forces_are_antisymmetric() {
        let parameters = SimulationParameters {
            rest_density: 0.0,
            surface_tension: 1.0,
            ..Default::default()
        };
        let mut particles = Particles::default();
        particles.push(Point::new(0.0, 0.0, 0.0), Vector::new(0.5, 0.0, 0.0), false);
        particles.push(Point::new(0.02, 0.01, 0.0), Vector::new(0.0, -0.5, 0.0), false);
        run(&parameters, &mut particles);

        let sum = particles.forces[0] + particles.forces[1];
        assert_lt!(sum.magnitude(), particles.forces[0].magnitude() * 1.0e-4);
        assert_gt!(particles.forces[0].magnitude(), 0.0);
    }

    #[test]
    fn viscosity_drags_towards_neighbor_velocity() {
        let parameters = SimulationParameters::default();
        let mut particles = Particles::default();
        // far from rest density, so pressure is zero and only viscosity acts
        particles.push(Point::new(0.0, 0.0, 0.0), Vector::zero(), false);
        particles.push(Point::new(0.02, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0), false);
        run(&parameters, &mut particles);

        let expected = parameters.viscosity * parameters.particle_mass * (1.0 - 0.02 / parameters.smoothing_length);
        assert!((particles.forces[0].z - expected).abs() < expected * 1.0e-4);
        assert!((particles.forces[1].z + expected).abs() < expected * 1.0e-4);
        assert_eq!(particles.forces[0].x, 0.0);
    }

    #[test]
    fn static_neighbors_skip_viscosity() {
        let parameters = SimulationParameters {
            has_static_particles: true,
            ..Default::default()
        };
        let mut particles = Particles::default();
        particles.push(Point::new(0.0, 0.0, 0.0), Vector::zero(), false);
        particles.push(Point::new(0.02, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0), true);
        run(&parameters, &mut particles);
        assert_eq!(particles.forces[0], Vector::zero());
        // the static particle itself still feels its dynamic neighbor
        assert_lt!(particles.forces[1].z, 0.0);
    }

    #[test]
    fn brute_force_emits_messages_matching_partitioned_forces() {
        let partitioned = SimulationParameters::default();
        let brute_force = SimulationParameters {
            uses_spatial_partition: false,
            ..Default::default()
        };
        let mut particles_partitioned = compressed_block(0.8, &partitioned);
        let mut particles_brute_force = particles_partitioned.clone();

        assert!(run(&partitioned, &mut particles_partitioned).is_empty());
        let messages = run(&brute_force, &mut particles_brute_force);
        assert_eq!(messages.len(), particles_brute_force.len());

        for i in 0..messages.len() {
            assert_eq!(messages[i].id, particles_brute_force.ids[i]);
            assert_eq!(messages[i].force, particles_brute_force.forces[i]);
            let difference = (particles_partitioned.forces[i] - particles_brute_force.forces[i]).magnitude();
            assert_le!(difference, particles_partitioned.forces[i].magnitude() * 1.0e-4 + 1.0e-6);
        }
    }
}
