use crate::units::*;
use cgmath::prelude::*;
use rand::Rng;

use super::error::SimulationError;
use super::parameters::SimulationParameters;
use super::particles::{ParticleId, Particles};
use super::snapshot::Snapshot;

pub struct FluidParticleWorld {
    pub particles: Particles,

    parameters: SimulationParameters,
    passed_time: Real, // simulated seconds
    num_steps: u64,
}

impl FluidParticleWorld {
    pub fn new(parameters: SimulationParameters) -> Result<FluidParticleWorld, SimulationError> {
        parameters.validate()?;
        Ok(FluidParticleWorld {
            particles: Default::default(),
            parameters,
            passed_time: 0.0,
            num_steps: 0,
        })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn smoothing_length(&self) -> Real {
        self.parameters.smoothing_length
    }

    pub fn particle_mass(&self) -> Real {
        self.parameters.particle_mass
    }

    // how much physical time has passed in the simulation
    pub fn passed_time(&self) -> Real {
        self.passed_time
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub(super) fn advance_time(&mut self) {
        self.passed_time += self.parameters.timestep;
        self.num_steps += 1;
    }

    pub fn restart_time(&mut self) {
        self.passed_time = 0.0;
        self.num_steps = 0;
    }

    pub fn add_particle(&mut self, position: Point, velocity: Vector) -> ParticleId {
        self.particles.push(position, velocity, false)
    }

    pub fn add_static_particle(&mut self, position: Point) -> ParticleId {
        self.particles.push(position, Vector::zero(), true)
    }

    pub fn remove_all_particles(&mut self) {
        self.particles.clear();
    }

    /// Adds `counts` particles per axis on a cubic lattice with rest spacing, starting at `min`.
    /// - `jitter_amount`: Amount of jitter relative to the spacing. 0 for perfect lattice.
    ///
    /// Returns the number of added particles.
    pub fn add_fluid_lattice(&mut self, min: Point, counts: [usize; 3], jitter_amount: Real, rng: &mut impl Rng) -> usize {
        let spacing = self.parameters.rest_spacing();
        let jitter_factor = spacing * jitter_amount;
        if jitter_factor > 0.0 {
            self.add_lattice(min, counts, spacing, false, || {
                (rng.gen::<Vector>() - Vector::new(0.5, 0.5, 0.5)) * jitter_factor
            })
        } else {
            self.add_lattice(min, counts, spacing, false, Vector::zero)
        }
    }

    /// Fills the axis aligned box between `min` and `max` with fluid at rest spacing.
    pub fn add_fluid_box(&mut self, min: Point, max: Point, jitter_amount: Real, rng: &mut impl Rng) -> usize {
        let counts = Self::lattice_counts(min, max, self.parameters.rest_spacing());
        self.add_fluid_lattice(min, counts, jitter_amount, rng)
    }

    /// Fills the axis aligned box between `min` and `max` with static particles at rest spacing.
    /// Static particles only stay in place if the parameters enable static particle handling.
    pub fn add_boundary_box(&mut self, min: Point, max: Point) -> usize {
        let spacing = self.parameters.rest_spacing();
        let counts = Self::lattice_counts(min, max, spacing);
        self.add_lattice(min, counts, spacing, true, Vector::zero)
    }

    fn lattice_counts(min: Point, max: Point, spacing: Real) -> [usize; 3] {
        let extent = max - min;
        let count = |e: Real| std::cmp::max(1, (e / spacing).floor() as usize + 1);
        [count(extent.x), count(extent.y), count(extent.z)]
    }

    // `offset` is added to every lattice position, e.g. for jitter.
    fn add_lattice(
        &mut self,
        min: Point,
        counts: [usize; 3],
        spacing: Real,
        is_static: bool,
        mut offset: impl FnMut() -> Vector,
    ) -> usize {
        let num_particles = counts[0] * counts[1] * counts[2];
        self.particles.reserve(num_particles);

        for z in 0..counts[2] {
            for y in 0..counts[1] {
                for x in 0..counts[0] {
                    let position = min + Vector::new(x as Real, y as Real, z as Real) * spacing + offset();
                    self.particles.push(position, Vector::zero(), is_static);
                }
            }
        }

        tracing::info!(
            num_particles,
            ?counts,
            spacing,
            is_static,
            total = self.particles.len(),
            "added particle lattice"
        );
        num_particles
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.num_steps,
            time: self.passed_time,
            parameters: self.parameters.clone(),
            particles: self.particles.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::SmallRng {
        rand::rngs::SmallRng::seed_from_u64(42)
    }

    #[test]
    fn rejects_invalid_parameters() {
        let parameters = SimulationParameters {
            timestep: -1.0,
            ..Default::default()
        };
        assert!(FluidParticleWorld::new(parameters).is_err());
    }

    #[test]
    fn lattice_has_rest_spacing() {
        let mut world = FluidParticleWorld::new(Default::default()).unwrap();
        let added = world.add_fluid_lattice(Point::new(-0.1, -0.1, -0.1), [3, 4, 5], 0.0, &mut rng());
        assert_eq!(added, 60);
        assert_eq!(world.particles.len(), 60);

        let spacing = world.parameters().rest_spacing();
        let p0 = world.particles.positions[0];
        let p1 = world.particles.positions[1];
        let p3 = world.particles.positions[3];
        assert!((p1.x - p0.x - spacing).abs() < 1.0e-6);
        assert!((p3.y - p0.y - spacing).abs() < 1.0e-6);
        assert!(world.particles.velocities.iter().all(|v| *v == Vector::zero()));
    }

    #[test]
    fn jitter_stays_within_cell() {
        let mut world = FluidParticleWorld::new(Default::default()).unwrap();
        world.add_fluid_lattice(Point::origin(), [4, 4, 4], 0.5, &mut rng());
        let spacing = world.parameters().rest_spacing();
        for (i, p) in world.particles.positions.iter().enumerate() {
            let lattice = Point::new((i % 4) as Real, ((i / 4) % 4) as Real, (i / 16) as Real) * spacing;
            assert!((*p - lattice).magnitude() <= spacing * 0.5);
        }
    }

    #[test]
    fn box_fill_covers_extent() {
        let mut world = FluidParticleWorld::new(Default::default()).unwrap();
        let spacing = world.parameters().rest_spacing();
        let max = Point::new(spacing * 4.5, spacing * 2.5, spacing * 0.2);
        let added = world.add_fluid_box(Point::origin(), max, 0.0, &mut rng());
        assert_eq!(added, 5 * 3 * 1);

        world.add_boundary_box(Point::new(0.0, -spacing, 0.0), Point::new(spacing, -spacing, 0.0));
        assert_eq!(world.particles.num_static_particles(), 2);
    }

    #[test]
    fn boundary_box_is_an_exact_lattice() {
        let mut world = FluidParticleWorld::new(Default::default()).unwrap();
        let spacing = world.parameters().rest_spacing();
        let min = Point::new(-0.1, -0.2, 0.05);
        let added = world.add_boundary_box(min, min + Vector::new(spacing * 2.5, spacing * 0.5, spacing * 1.5));
        assert_eq!(added, 3 * 1 * 2);
        assert_eq!(world.particles.num_static_particles(), 6);

        for (i, p) in world.particles.positions.iter().enumerate() {
            let expected = min + Vector::new((i % 3) as Real, 0.0, (i / 3) as Real) * spacing;
            assert_eq!(*p, expected);
        }
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut world = FluidParticleWorld::new(Default::default()).unwrap();
        world.add_particle(Point::new(0.1, 0.2, 0.3), Vector::new(1.0, 0.0, 0.0));
        world.advance_time();

        let snapshot = world.snapshot();
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.time, world.parameters().timestep);
        assert_eq!(snapshot.particles.len(), 1);
        assert_eq!(snapshot.particles[0].velocity, Vector::new(1.0, 0.0, 0.0));

        world.restart_time();
        assert_eq!(world.num_steps(), 0);
    }
}
