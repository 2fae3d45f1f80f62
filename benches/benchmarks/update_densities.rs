use criterion::{black_box, criterion_group, Criterion};
use rand::SeedableRng;

use sph3d::{sph, units::*};

fn bench_update_densities(c: &mut Criterion) {
    let parameters = sph::SimulationParameters::default();
    let mut fluid_world = sph::FluidParticleWorld::new(parameters.clone()).unwrap();
    let mut rng = rand::rngs::SmallRng::seed_from_u64(123);
    fluid_world.add_fluid_lattice(Point::new(-0.2, -0.2, -0.2), [20, 20, 20], 0.5, &mut rng);

    let kernels = black_box(sph::SmoothingKernels::new(&parameters));
    let mut search = sph::NeighborhoodSearch::new(parameters.smoothing_length);
    search.update(&fluid_world.particles.positions);
    let mut location_velocity = Vec::new();
    let mut density_pressure = Vec::new();
    sph::broadcast::broadcast_state(&fluid_world.particles, &mut location_velocity);

    c.bench_function(
        &format!("compute_density_pressure - {} fluid particles", fluid_world.particles.len()),
        |b| {
            b.iter(|| {
                sph::density_pressure::compute_density_pressure(
                    &parameters,
                    &kernels.density,
                    sph::NeighborQuery::Partitioned(&search),
                    &location_velocity,
                    &mut fluid_world.particles,
                    &mut density_pressure,
                )
            })
        },
    );
}

criterion_group!(update_densities, bench_update_densities);
