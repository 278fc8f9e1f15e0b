use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use succinct_trie::prelude::*;

use crate::benchmarks::{get_bits, BIT_VECTOR_LENGTH};

fn rank_select_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    let bits = get_bits(&mut rng);

    let mut group = c.benchmark_group("rank directory");
    for (l1, l2) in [(L1, L2), (256, 32), (4096, 64)] {
        let params = RankDirectoryParams::new(l1, l2).unwrap();
        let directory = RankDirectory::with_parameters(bits.clone(), BIT_VECTOR_LENGTH, params).unwrap();
        let ones = directory.count(true);
        let label = format!("{}/{}", l1, l2);

        group.bench_function(BenchmarkId::new("rank1", &label), |b| {
            b.iter(|| directory.rank(true, black_box(rng.gen_range(0..BIT_VECTOR_LENGTH))))
        });
        group.bench_function(BenchmarkId::new("select1", &label), |b| {
            b.iter(|| directory.select(true, black_box(rng.gen_range(1..=ones))))
        });
        group.bench_function(BenchmarkId::new("select0", &label), |b| {
            b.iter(|| directory.select(false, black_box(rng.gen_range(1..=BIT_VECTOR_LENGTH - ones))))
        });
    }
    group.finish();
}

criterion_group! {
    name = rank_select_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = rank_select_benchmark
}
