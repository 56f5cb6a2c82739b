//! Benchmarks for blue-noise point sampling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voronoise::sampling::{generate, DensityField, PoissonDiskSampler, SamplingDomain};

fn bench_poisson_disk(c: &mut Criterion) {
    let mut group = c.benchmark_group("poisson_disk");

    // Vary the target count; the radius shrinks as 1/sqrt(n)
    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("target_count", count), &count, |b, &count| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(7);
                generate(black_box(count), None, &mut rng)
            })
        });
    }

    group.finish();
}

fn bench_poisson_disk_attempts(c: &mut Criterion) {
    let mut group = c.benchmark_group("poisson_disk_attempts");

    // Vary max_attempts to see impact on quality vs speed
    for attempts in [10, 20, 30, 50] {
        let sampler = PoissonDiskSampler::for_count(2_000)
            .expect("valid count")
            .max_attempts(attempts);
        group.bench_with_input(
            BenchmarkId::new("max_attempts", attempts),
            &sampler,
            |b, sampler| {
                b.iter(|| {
                    let mut rng = ChaCha8Rng::seed_from_u64(7);
                    sampler.sample(None, &mut rng)
                })
            },
        );
    }

    group.finish();
}

fn bench_domains_and_thinning(c: &mut Criterion) {
    let mut group = c.benchmark_group("poisson_disk_variants");
    let field = DensityField::uniform(512, 512, 0.5).expect("valid field");

    let square = PoissonDiskSampler::for_count(2_000).expect("valid count");
    let disc = square.clone().domain(SamplingDomain::Disc);

    group.bench_function("square", |b| {
        b.iter(|| square.sample(None, &mut ChaCha8Rng::seed_from_u64(7)))
    });
    group.bench_function("disc", |b| {
        b.iter(|| disc.sample(None, &mut ChaCha8Rng::seed_from_u64(7)))
    });
    group.bench_function("square_thinned", |b| {
        b.iter(|| square.sample(Some(black_box(&field)), &mut ChaCha8Rng::seed_from_u64(7)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_poisson_disk,
    bench_poisson_disk_attempts,
    bench_domains_and_thinning
);
criterion_main!(benches);
