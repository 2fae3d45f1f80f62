use criterion::{black_box, criterion_group, Criterion};

use sph3d::sph::morton::*;

fn bench_morton(c: &mut Criterion) {
    let x: u32 = 123;
    let y: u32 = 321;
    let z: u32 = 4567;

    let mut group = c.benchmark_group("morton");
    group.bench_function("encode", |b| b.iter(|| encode(black_box(x), black_box(y), black_box(z))));
    let code = encode(x, y, z);
    group.bench_function("decode", |b| b.iter(|| decode(black_box(code))));
    group.finish();
}

fn config() -> Criterion {
    Criterion::default()
}

criterion_group!(
    name = morton;
    config = config();
    targets = bench_morton
);
