use std::collections::VecDeque;
use std::iter::Take;

use anyhow::{ensure, Result};
use log::debug;
use mem_dbg::{MemDbg, MemSize};

use crate::rank::directory::{RankDirectory, RankDirectoryParams};
use crate::traits::rank_select::Select;
use crate::trie::node::FrozenTrieNode;
use crate::trie::suggestions::Suggestions;
use crate::trie::decode_word;
use crate::utils::bytes_for_bits;
use crate::{Letter, NodeIndex, PAYLOAD_WIDTH};

/// A read-only trie stored as a level-order unary degree sequence (LOUDS) followed by one
/// [`PAYLOAD_WIDTH`]-bit slot per node.
///
/// The shape sequence starts with `10` (a super-root pointing at the root) and then, for each
/// node in level order, has one `1` per child followed by a `0`. It is `2 * node_count + 1` bits
/// long. Each payload slot holds the final flag in its most significant bit followed by the
/// node's letter.
#[derive(Clone, Debug, MemDbg, MemSize)]
pub struct FrozenTrie {
    /// Rank directory over the shape sequence. Its data is the whole buffer, payload included.
    shape: RankDirectory,

    node_count: usize,

    /// Position of the first payload slot.
    letter_start: usize,
}

impl FrozenTrie {
    /// Returns the length, in bits, of the shape sequence of a trie with `node_count` nodes.
    pub fn shape_bits(node_count: usize) -> usize {
        2 * node_count + 1
    }

    /// Returns the length, in bytes, of the buffer encoding a trie with `node_count` nodes.
    pub fn data_len(node_count: usize) -> usize {
        bytes_for_bits(Self::shape_bits(node_count) + node_count * PAYLOAD_WIDTH)
    }

    /// Decodes the trie with `node_count` nodes encoded in `data`, building the rank directory over
    /// its shape with the default block widths.
    pub fn new(data: Vec<u8>, node_count: usize) -> Result<Self> {
        Self::with_parameters(data, node_count, RankDirectoryParams::default())
    }

    /// Decodes the trie with `node_count` nodes encoded in `data`, building the rank directory over
    /// its shape with the given block widths.
    pub fn with_parameters(data: Vec<u8>, node_count: usize, params: RankDirectoryParams) -> Result<Self> {
        Self::check_len(&data, node_count)?;
        let shape = RankDirectory::with_parameters(data, Self::shape_bits(node_count), params)?;
        Self::from_shape(shape, node_count)
    }

    /// Decodes the trie with `node_count` nodes encoded in `data`, reusing a previously built rank
    /// directory over its shape.
    pub fn with_directory(
        data: Vec<u8>,
        directory: Vec<u8>,
        node_count: usize,
        params: RankDirectoryParams,
    ) -> Result<Self> {
        Self::check_len(&data, node_count)?;
        let shape = RankDirectory::from_parts(data, directory, Self::shape_bits(node_count), params)?;
        Self::from_shape(shape, node_count)
    }

    fn check_len(data: &[u8], node_count: usize) -> Result<()> {
        ensure!(node_count > 0, "A trie has at least the root node");
        ensure!(
            data.len() == Self::data_len(node_count),
            "A trie with {} nodes takes {} bytes, found {}",
            node_count,
            Self::data_len(node_count),
            data.len()
        );
        Ok(())
    }

    fn from_shape(shape: RankDirectory, node_count: usize) -> Result<Self> {
        let bits = shape.data();
        ensure!(bits.get(0, 2) == 0b10, "The shape sequence must start with the super-root");
        ensure!(
            shape.count(true) == node_count,
            "The shape sequence holds {} edges, expected {}",
            shape.count(true),
            node_count
        );

        // every edge must come from an earlier node and every node must be reached before its
        // own children list ends
        let mut ones = 0;
        let mut zeros = 0;
        for pos in 0..shape.num_bits() {
            if bits.bit(pos) {
                ensure!(zeros <= ones, "Edge at bit {} points back to an earlier node", pos);
                ones += 1;
            } else {
                zeros += 1;
                ensure!(zeros <= ones + 1, "Node {} is terminated before being reached", zeros - 2);
            }
        }

        debug!("Decoded frozen trie with {} nodes", node_count);

        Ok(Self {
            shape,
            node_count,
            letter_start: Self::shape_bits(node_count),
        })
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn params(&self) -> RankDirectoryParams {
        self.shape.params()
    }

    /// The rank directory over the shape sequence.
    pub fn shape(&self) -> &RankDirectory {
        &self.shape
    }

    /// The encoded trie: shape sequence followed by the payload slots.
    pub fn data_bytes(&self) -> &[u8] {
        self.shape.data_bytes()
    }

    /// The serialized rank directory over the shape sequence.
    pub fn directory_bytes(&self) -> &[u8] {
        self.shape.directory_bytes()
    }

    /// Position of the `k`-th terminator of the shape sequence. The validated shape holds
    /// `node_count + 1` of them.
    #[inline(always)]
    fn select_zero(&self, k: usize) -> usize {
        self.shape
            .select(false, k)
            .expect("The shape sequence holds a terminator for each node")
    }

    /// Reads the letter of the node at `index` from its payload slot, without decoding its
    /// children.
    #[inline(always)]
    pub(crate) fn letter_at(&self, index: NodeIndex) -> Letter {
        let slot = self.letter_start + index * PAYLOAD_WIDTH;
        self.shape.data().get(slot + 1, PAYLOAD_WIDTH - 1) as Letter
    }

    /// Decodes the node at `index`, which must be smaller than the number of nodes.
    pub(crate) fn node_at(&self, index: NodeIndex) -> FrozenTrieNode<'_> {
        debug_assert!(index < self.node_count);

        let bits = self.shape.data();
        let slot = self.letter_start + index * PAYLOAD_WIDTH;
        // the children of this node follow its own terminator and end at the next one
        let first_child = self.select_zero(index + 1) - index;
        let next_first_child = self.select_zero(index + 2) - index - 1;

        FrozenTrieNode {
            trie: self,
            index,
            letter: self.letter_at(index),
            is_final: bits.get(slot, 1) == 1,
            first_child,
            child_count: next_first_child - first_child,
        }
    }

    /// Returns the node at level-order position `index`.
    pub fn node(&self, index: NodeIndex) -> Result<FrozenTrieNode<'_>> {
        ensure!(
            index < self.node_count,
            "Node {} out of range: the trie has {} nodes",
            index,
            self.node_count
        );
        Ok(self.node_at(index))
    }

    pub fn root(&self) -> FrozenTrieNode<'_> {
        self.node_at(0)
    }

    /// Follows `letters` from the root, scanning the children of each node in encoded order.
    pub(crate) fn walk(&self, letters: &[u8]) -> Option<FrozenTrieNode<'_>> {
        let mut node = self.root();
        for letter in letters {
            node = node.children().find(|child| child.letter == *letter)?;
        }
        Some(node)
    }

    /// Returns the index of the node where `word` ends, if `word` is in the trie.
    pub fn lookup_exact(&self, word: &str) -> Option<NodeIndex> {
        self.walk(word.as_bytes())
            .filter(|node| node.is_final())
            .map(|node| node.index())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup_exact(word).is_some()
    }

    /// Returns at most `limit` words starting with `prefix`, lazily, in pre-order. Invalid UTF-8
    /// sequences in a word are replaced by U+FFFD.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Take<Suggestions<'_>> {
        Suggestions::new(self, prefix).take(limit)
    }

    /// Collects [`suggest`](Self::suggest).
    pub fn suggested_words(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.suggest(prefix, limit).collect()
    }

    /// Visits every node in level order, i.e. by increasing index.
    pub fn traverse_level_order(&self, mut visit: impl FnMut(&FrozenTrieNode<'_>)) {
        let mut queue = VecDeque::from([self.root()]);
        while let Some(node) = queue.pop_front() {
            queue.extend(node.children());
            visit(&node);
        }
    }

    /// Visits every node in pre-order, children in encoded order.
    pub fn traverse_pre_order(&self, mut visit: impl FnMut(&FrozenTrieNode<'_>)) {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            stack.extend(node.children().rev());
            visit(&node);
        }
    }

    /// Follows the last child from the root until reaching a leaf and returns the letters met.
    ///
    /// This is the greatest key only if the builder encodes children in increasing order.
    pub fn last_lexicographic_key(&self) -> String {
        let mut letters = Vec::new();
        let mut node = self.root();

        while let Some(last) = node.children().next_back() {
            letters.push(last.letter());
            node = last;
        }
        decode_word(&letters)
    }
}
