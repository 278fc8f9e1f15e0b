use std::collections::VecDeque;

use anyhow::Result;
use log::debug;

use crate::bits::writer::BitWriter;
use crate::rank::directory::RankDirectoryParams;
use crate::trie::frozen::FrozenTrie;
use crate::trie::map::FrozenTrieMap;
use crate::{Letter, PAYLOAD_WIDTH};

#[derive(Clone, Debug, Default)]
struct BuilderNode {
    letter: Letter,
    is_final: bool,

    /// Indices of the children in `TrieBuilder::nodes`, in insertion order.
    children: Vec<usize>,
}

/// A conventional, mutable trie used to produce the buffers decoded by [`FrozenTrie`].
///
/// Children are kept in insertion order, which becomes the encoded order of the frozen trie.
#[derive(Clone, Debug)]
pub struct TrieBuilder {
    /// All the nodes, the root first.
    nodes: Vec<BuilderNode>,

    words: usize,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![BuilderNode::default()],
            words: 0,
        }
    }

    /// Inserts `word`, returning whether it was not already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = 0;

        for letter in word.bytes() {
            let existing = self.nodes[node]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[*child].letter == letter);

            node = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(BuilderNode {
                        letter,
                        ..Default::default()
                    });
                    self.nodes[node].children.push(child);
                    child
                }
            };
        }

        let inserted = !self.nodes[node].is_final;
        if inserted {
            self.nodes[node].is_final = true;
            self.words += 1;
        }
        inserted
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn word_count(&self) -> usize {
        self.words
    }

    /// Returns the node indices in level order.
    fn level_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([0]);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            queue.extend(self.nodes[node].children.iter().copied());
        }
        order
    }

    /// Encodes the trie as the shape sequence followed by the payload slots, returning the buffer
    /// and the number of final nodes.
    pub fn encode(&self) -> (Vec<u8>, usize) {
        let order = self.level_order();
        let mut writer = BitWriter::with_capacity(
            FrozenTrie::shape_bits(self.node_count()) + self.node_count() * PAYLOAD_WIDTH,
        );

        // the super-root has the root as its only child
        writer.write(0b10, 2);
        for node in &order {
            for _ in &self.nodes[*node].children {
                writer.push_bit(true);
            }
            writer.push_bit(false);
        }

        for node in &order {
            let node = &self.nodes[*node];
            let slot = (node.is_final as u64) << Letter::BITS | node.letter as u64;
            writer.write(slot, PAYLOAD_WIDTH);
        }

        debug!(
            "Encoded {} nodes and {} words into {} bits",
            self.node_count(),
            self.words,
            writer.len()
        );
        (writer.into_bytes(), self.words)
    }

    /// Encodes and decodes the trie, using the default block widths.
    pub fn freeze(&self) -> Result<FrozenTrie> {
        FrozenTrie::new(self.encode().0, self.node_count())
    }

    /// Encodes the trie and maps its words onto dense ids.
    pub fn freeze_map(&self, params: RankDirectoryParams) -> Result<FrozenTrieMap> {
        FrozenTrieMap::with_parameters(self.encode().0, self.node_count(), params)
    }
}

impl<'a> Extend<&'a str> for TrieBuilder {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for TrieBuilder {
    fn from_iter<I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        let mut builder = Self::new();
        builder.extend(words);
        builder
    }
}
