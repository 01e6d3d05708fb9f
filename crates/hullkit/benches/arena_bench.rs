//! Criterion benchmarks for arena sequences: bulk push and bucket max-gap.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hullkit::api::{Arena, Sequence};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn values(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1e6..1e6)).collect()
}

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence");
    for &n in &[1_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::new("push", n), &n, |b, &n| {
            let arena = Arena::new(n * 8);
            b.iter(|| {
                arena.clear();
                let mut s = Sequence::<f64>::new(n, &arena).unwrap();
                for i in 0..n {
                    s.push(i as f64).unwrap();
                }
                s.len()
            })
        });
        group.bench_with_input(BenchmarkId::new("max_gap", n), &n, |b, &n| {
            let input = values(n, 7);
            b.iter_batched(
                || {
                    let arena = Arena::new(n * 8 + 2 * n * 8);
                    (input.clone(), arena)
                },
                |(input, arena)| {
                    let s = Sequence::from_slice(&input, &arena).unwrap();
                    s.max_gap_in(&arena).unwrap()
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequence);
criterion_main!(benches);
