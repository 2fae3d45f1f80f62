use rayon::prelude::*;

use super::super::messages::LocationVelocityMessage;
use super::super::particles::Particles;

// Publishes a consistent snapshot of all positions and velocities for the density stage.
pub fn broadcast_state(particles: &Particles, location_velocity_messages: &mut Vec<LocationVelocityMessage>) {
    microprofile::scope!("StagedSolver", "broadcast_state");

    location_velocity_messages.clear();
    location_velocity_messages.par_extend(
        (&particles.ids, &particles.positions, &particles.velocities)
            .into_par_iter()
            .map(|(&id, &position, &velocity)| LocationVelocityMessage { id, position, velocity }),
    );
}
