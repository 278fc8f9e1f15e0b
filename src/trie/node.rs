use std::fmt;

use anyhow::{ensure, Result};

use crate::trie::frozen::FrozenTrie;
use crate::{Letter, NodeIndex};

/// A node of a [`FrozenTrie`], decoded on demand from the packed buffer.
///
/// Nodes are cheap values that borrow the trie they come from: nothing is stored besides what
/// rank and select recover from the bits.
#[derive(Clone, Copy)]
pub struct FrozenTrieNode<'a> {
    pub(crate) trie: &'a FrozenTrie,
    pub(crate) index: NodeIndex,
    pub(crate) letter: Letter,
    pub(crate) is_final: bool,
    pub(crate) first_child: NodeIndex,
    pub(crate) child_count: usize,
}

impl<'a> FrozenTrieNode<'a> {
    /// The level-order position of the node.
    #[inline(always)]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// The letter on the edge leading to this node. The root carries 0.
    #[inline(always)]
    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Whether a word ends at this node.
    #[inline(always)]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// The level-order position of the first child.
    #[inline(always)]
    pub fn first_child(&self) -> NodeIndex {
        self.first_child
    }

    #[inline(always)]
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Returns the `i`-th (0-based) child, in encoded order.
    pub fn child(&self, i: usize) -> Result<FrozenTrieNode<'a>> {
        ensure!(
            i < self.child_count,
            "Child {} out of range: node {} has {} children",
            i,
            self.index,
            self.child_count
        );
        Ok(self.trie.node_at(self.first_child + i))
    }

    /// Returns the children in encoded order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = FrozenTrieNode<'a>> + ExactSizeIterator {
        let trie = self.trie;
        let first_child = self.first_child;
        (0..self.child_count).map(move |i| trie.node_at(first_child + i))
    }
}

impl fmt::Debug for FrozenTrieNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenTrieNode")
            .field("index", &self.index)
            .field("letter", &(self.letter as char))
            .field("is_final", &self.is_final)
            .field("first_child", &self.first_child)
            .field("child_count", &self.child_count)
            .finish()
    }
}
