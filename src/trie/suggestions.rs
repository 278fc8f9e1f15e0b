use crate::trie::decode_word;
use crate::trie::frozen::FrozenTrie;
use crate::trie::node::FrozenTrieNode;

/// Lazily enumerates, in pre-order, the words of a [`FrozenTrie`] starting with a given prefix.
///
/// Siblings are visited in their encoded order, so the words come out in the order the builder
/// laid them out, not in alphabetical order.
pub struct Suggestions<'a> {
    /// Nodes still to visit, with their depth below the node the prefix leads to.
    stack: Vec<(FrozenTrieNode<'a>, usize)>,

    /// The prefix followed by the letters from the prefix node to the last visited node.
    word: Vec<u8>,

    prefix_len: usize,
}

impl<'a> Suggestions<'a> {
    pub(crate) fn new(trie: &'a FrozenTrie, prefix: &str) -> Self {
        let stack = match trie.walk(prefix.as_bytes()) {
            Some(node) => vec![(node, 0)],
            None => Vec::new(),
        };

        Self {
            stack,
            word: prefix.as_bytes().to_vec(),
            prefix_len: prefix.len(),
        }
    }
}

impl Iterator for Suggestions<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            if depth > 0 {
                self.word.truncate(self.prefix_len + depth - 1);
                self.word.push(node.letter());
            }

            // reversed, so that the first encoded child is popped first
            self.stack
                .extend(node.children().rev().map(|child| (child, depth + 1)));

            if node.is_final() {
                return Some(decode_word(&self.word));
            }
        }
        None
    }
}
