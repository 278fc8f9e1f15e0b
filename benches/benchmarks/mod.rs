use rand::prelude::{Distribution, SmallRng};
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;

pub mod lookup;
pub mod rank_select;

/// Length of the bit vectors used to bench the rank directory.
const BIT_VECTOR_LENGTH: usize = 1 << 22;

/// Number of words inserted in the benched trie.
const WORD_LIST_LENGTH: usize = 200_000;

/// Maximum length of the benched words.
const MAXIMUM_WORD_LENGTH: u64 = 16;

fn get_bits(rng: &mut SmallRng) -> Vec<u8> {
    (0..BIT_VECTOR_LENGTH / 8).map(|_| rng.gen()).collect()
}

fn get_words() -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(0);
    let lengths = Zipf::new(MAXIMUM_WORD_LENGTH, 1.0).unwrap();

    (0..WORD_LIST_LENGTH)
        .map(|_| {
            let len = lengths.sample(&mut rng) as usize;
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}
