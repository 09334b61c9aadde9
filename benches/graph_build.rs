use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cryptograph_rs::graph::{build, ProjectRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn batch(n: usize) -> Vec<ProjectRecord> {
    (0..n)
        .map(|i| {
            ProjectRecord::new(format!("coin-{i}"), format!("Coin {i}"), "cn")
                .with_market_cap((n - i) as f64 * 1.0e6)
                .with_volume((i % 97) as f64 * 1.0e5)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    for n in [250usize, 1000, 4000] {
        let input = batch(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(build(input, &mut rng).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
