use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use osync::{simulate, simulate_round_robin, simulate_sjf, Algorithm};

/// Deterministic reference string with some locality: mostly a sliding window of pages,
/// with an occasional jump.
fn reference_string(len: usize, pages: i64) -> Vec<i64> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..len)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let window = (i as i64 / 16) % pages;
            if state % 8 == 0 {
                (state % pages as u64) as i64
            } else {
                (window + (state % 4) as i64) % pages
            }
        })
        .collect()
}

fn page_replacement(c: &mut Criterion) {
    let references = reference_string(10_000, 64);
    let mut group = c.benchmark_group("page_replacement");
    for frames in [4, 16, 64] {
        for algorithm in [Algorithm::Fifo, Algorithm::Lru] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), frames),
                &frames,
                |b, &frames| b.iter(|| simulate(algorithm, black_box(&references), frames)),
            );
        }
    }
    group.finish();
}

fn scheduling(c: &mut Criterion) {
    let bursts: Vec<i64> = (0..1_000).map(|i| 1 + (i * 37) % 50).collect();
    let mut group = c.benchmark_group("scheduling");
    for quantum in [1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("round_robin", quantum),
            &quantum,
            |b, &quantum| b.iter(|| simulate_round_robin(black_box(&bursts), quantum)),
        );
    }
    group.bench_function("sjf", |b| b.iter(|| simulate_sjf(black_box(&bursts))));
    group.finish();
}

criterion_group!(benches, page_replacement, scheduling);
criterion_main!(benches);
