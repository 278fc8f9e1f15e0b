//! Frozen, bit-packed tries (LOUDS) navigated through rank/select directories.
//!
//! A [`TrieBuilder`](builder::TrieBuilder) produces a flat byte buffer that a
//! [`FrozenTrie`](trie::frozen::FrozenTrie) decodes on the fly, without ever
//! materializing a pointer-based tree. A [`FrozenTrieMap`](trie::map::FrozenTrieMap)
//! adds a bijection between the stored words and dense ids `1..=word_count`.

pub mod bits;
pub mod builder;
pub mod rank;
pub mod trie;

pub mod traits;
pub mod utils;

/// Default width, in bits, of the coarse blocks of a [`RankDirectory`](rank::directory::RankDirectory).
pub const L1: usize = 32 * 32;

/// Default width, in bits, of the fine blocks of a [`RankDirectory`](rank::directory::RankDirectory).
/// Must divide [`L1`].
pub const L2: usize = 32;

/// How many bits each node occupies in the payload region: one bit for the final flag followed
/// by the bits of its [`Letter`].
pub const PAYLOAD_WIDTH: usize = 1 + Letter::BITS as usize;

/// The type representing the symbol stored in each node. Words are stored as their UTF-8 bytes.
pub type Letter = u8;

/// The level-order position of a node in the trie. The root is always 0.
pub type NodeIndex = usize;

/// A 1-based, gap-free identifier assigned to each word of a [`FrozenTrieMap`](trie::map::FrozenTrieMap).
pub type DenseId = usize;

pub mod prelude {
    pub use crate::bits::reader::BitReader;
    pub use crate::bits::writer::BitWriter;
    pub use crate::builder::TrieBuilder;
    pub use crate::rank::directory::{RankDirectory, RankDirectoryParams};
    pub use crate::traits::rank_select::{Rank, Select};
    pub use crate::trie::frozen::FrozenTrie;
    pub use crate::trie::map::FrozenTrieMap;
    pub use crate::trie::node::FrozenTrieNode;
    pub use crate::trie::suggestions::Suggestions;
    pub use crate::{DenseId, Letter, NodeIndex, L1, L2, PAYLOAD_WIDTH};
}
