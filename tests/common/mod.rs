/*
 * Utility functions and consts used by the tests.
 *
 */
#![allow(dead_code)]

use rand::prelude::{Distribution, SmallRng};
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;
use succinct_trie::prelude::*;

/// Words inserted, in this order, in the sample trie.
pub const WORDS: [&str; 7] = ["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"];

/// Number of nodes of the sample trie, root included.
pub const NODE_COUNT: usize = 37;

/// Maximum length of the random words.
const MAXIMUM_WORD_LENGTH: u64 = 12;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds the trie holding [`WORDS`], inserted in non-alphabetical order.
pub fn sample_builder() -> TrieBuilder {
    WORDS.into_iter().collect()
}

pub fn sample_trie(params: RankDirectoryParams) -> FrozenTrie {
    let builder = sample_builder();
    let (data, _) = builder.encode();
    FrozenTrie::with_parameters(data, builder.node_count(), params).unwrap()
}

pub fn sample_map(params: RankDirectoryParams) -> FrozenTrieMap {
    sample_builder().freeze_map(params).unwrap()
}

/// Returns `len` random bits, with ones appearing with probability `density`, packed as bytes.
pub fn random_bits(seed: u64, len: usize, density: f64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut writer = BitWriter::with_capacity(len);

    for _ in 0..len {
        writer.push_bit(rng.gen_bool(density));
    }
    writer.into_bytes()
}

/// Creates `count` random lowercase words whose lengths follow a Zipfian distribution over
/// `1..=MAXIMUM_WORD_LENGTH`.
pub fn random_words(seed: u64, count: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let lengths = Zipf::new(MAXIMUM_WORD_LENGTH, 0.5_f64).unwrap();
    let mut words = Vec::with_capacity(count);

    for _ in 0..count {
        let len = lengths.sample(&mut rng) as usize;
        words.push((0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect());
    }
    words
}
