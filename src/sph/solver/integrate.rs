use crate::units::*;
use rayon::prelude::*;

use super::super::error::SimulationError;
use super::super::messages::MessageBoard;
use super::super::parameters::{ForceUnits, SimulationParameters};
use super::super::particles::Particles;

/// Semi-implicit Euler step of a single particle inside the reflective box.
///
/// Velocity is updated first, reflected per axis where the next position would leave the box,
/// the position is then advanced with the final velocity.
#[inline]
pub fn integrate_particle(parameters: &SimulationParameters, position: &mut Point, velocity: &mut Vector, force: Vector) {
    let dt = parameters.timestep;
    let acceleration = match parameters.force_units {
        ForceUnits::Acceleration => force,
        ForceUnits::Force => force / parameters.particle_mass,
    };
    *velocity += acceleration * dt;
    velocity.y -= parameters.gravity * dt;

    let w = parameters.half_boundary_width;
    for axis in 0..3 {
        if (position[axis] + velocity[axis] * dt).abs() > w {
            velocity[axis] = -velocity[axis] * parameters.restitution;
        }
    }
    *position += *velocity * dt;
}

/// Moves all dynamic particles by one timestep.
///
/// Forces are taken from the particles if the spatial partition is used, otherwise from the force messages.
pub fn integrate(parameters: &SimulationParameters, particles: &mut Particles, messages: &MessageBoard) -> Result<(), SimulationError> {
    microprofile::scope!("StagedSolver", "integrate");

    let skip_static = parameters.has_static_particles;
    let Particles {
        ids,
        positions,
        velocities,
        forces,
        is_static,
        ..
    } = particles;
    let particles = (positions, velocities, &*ids, &*forces, &*is_static).into_par_iter();

    if parameters.uses_spatial_partition {
        particles.for_each(|(position, velocity, _, &force, &is_static)| {
            if !(skip_static && is_static) {
                integrate_particle(parameters, position, velocity, force);
            }
        });
        Ok(())
    } else {
        particles.try_for_each(|(position, velocity, &id, _, &is_static)| {
            let message = messages.force_message(id).ok_or(SimulationError::MissingForceMessage(id))?;
            if !(skip_static && is_static) {
                integrate_particle(parameters, position, velocity, message.force);
            }
            Ok(())
        })
    }
}
