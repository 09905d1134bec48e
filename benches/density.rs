use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spotcoin::world::{build_density_zones, GeoPoint};

fn random_points(count: usize) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| GeoPoint::new(rng.gen_range(35.0..60.0), rng.gen_range(-10.0..30.0)))
        .collect()
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_density_zones");
    for count in [100, 1_000, 10_000] {
        let points = random_points(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| build_density_zones(black_box(points)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_density);
criterion_main!(benches);
