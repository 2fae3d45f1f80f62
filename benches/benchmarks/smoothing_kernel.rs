use criterion::{black_box, criterion_group, Criterion};

use sph3d::sph::{Cohesion, Kernel, Poly6, Spiky, Viscosity};
use sph3d::units::*;

fn bench_kernels(c: &mut Criterion) {
    let h = 0.057;
    let ri_to_rj = Vector::new(0.01, 0.02, -0.015);
    let r_sq: Real = 0.01 * 0.01 + 0.02 * 0.02 + 0.015 * 0.015;
    let r: Real = r_sq.sqrt();

    let poly6 = Poly6::new(h);
    let spiky = Spiky::new(h, 1.0e-6);
    let viscosity = Viscosity::new(h);
    let cohesion = Cohesion::new(h);

    let mut group = c.benchmark_group("smoothing_kernel");
    group.bench_function("poly6.evaluate", |b| b.iter(|| poly6.evaluate(black_box(r_sq), black_box(r))));
    group.bench_function("spiky.gradient", |b| {
        b.iter(|| spiky.gradient(black_box(ri_to_rj), black_box(r_sq), black_box(r)))
    });
    group.bench_function("viscosity.laplacian", |b| b.iter(|| viscosity.laplacian(black_box(r))));
    group.bench_function("cohesion.evaluate", |b| b.iter(|| cohesion.evaluate(black_box(r))));
    group.finish();
}

criterion_group!(smoothing_kernel, bench_kernels);
