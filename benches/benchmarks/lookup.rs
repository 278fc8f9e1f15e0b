use criterion::{black_box, criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use succinct_trie::prelude::*;

use crate::benchmarks::get_words;

fn lookup_benchmark(c: &mut Criterion) {
    let words = get_words();
    let map = words
        .iter()
        .map(String::as_str)
        .collect::<TrieBuilder>()
        .freeze_map(RankDirectoryParams::default())
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    let mut group = c.benchmark_group("frozen trie");
    group.throughput(criterion::Throughput::Elements(1));
    group.bench_function("lookup", |b| {
        b.iter(|| map.trie().lookup_exact(black_box(&words[rng.gen_range(0..words.len())])))
    });
    group.bench_function("lookup id", |b| {
        b.iter(|| map.lookup_id(black_box(&words[rng.gen_range(0..words.len())])))
    });
    group.bench_function("reverse lookup", |b| {
        b.iter(|| map.reverse_lookup(black_box(rng.gen_range(1..=map.word_count()))))
    });
    group.bench_function("suggest", |b| {
        b.iter(|| {
            let word = &words[rng.gen_range(0..words.len())];
            map.trie().suggested_words(black_box(&word[..1]), 10)
        })
    });
    group.finish();
}

criterion_group! {
    name = lookup_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = lookup_benchmark
}
