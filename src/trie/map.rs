use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::info;
use mem_dbg::{MemDbg, MemSize};

use crate::bits::writer::BitWriter;
use crate::rank::directory::{RankDirectory, RankDirectoryParams};
use crate::traits::rank_select::{Rank, Select};
use crate::trie::decode_word;
use crate::trie::frozen::FrozenTrie;
use crate::utils::bytes_for_bits;
use crate::DenseId;

/// Bytes taken by the node count leading the serialized form.
const HEADER_LEN: usize = 8;

/// A [`FrozenTrie`] whose words are mapped onto the dense ids `1..=word_count`, and back.
///
/// The id of a word is the number of final nodes up to and including its own node in level order,
/// so both directions are rank/select queries over one bit per node.
#[derive(Clone, Debug, MemDbg, MemSize)]
pub struct FrozenTrieMap {
    trie: FrozenTrie,

    /// Rank directory over the final flags of the nodes, in level order.
    keys: RankDirectory,
}

impl FrozenTrieMap {
    /// Decodes the trie with `node_count` nodes encoded in `data` and indexes its words, using the
    /// default block widths.
    pub fn new(data: Vec<u8>, node_count: usize) -> Result<Self> {
        Self::with_parameters(data, node_count, RankDirectoryParams::default())
    }

    /// Decodes the trie with `node_count` nodes encoded in `data` and indexes its words.
    pub fn with_parameters(data: Vec<u8>, node_count: usize, params: RankDirectoryParams) -> Result<Self> {
        Self::from_trie(FrozenTrie::with_parameters(data, node_count, params)?)
    }

    /// Indexes the words of an already decoded trie.
    pub fn from_trie(trie: FrozenTrie) -> Result<Self> {
        let mut finals = BitWriter::with_capacity(trie.node_count());
        trie.traverse_level_order(|node| finals.push_bit(node.is_final()));

        let keys = RankDirectory::with_parameters(finals.into_bytes(), trie.node_count(), trie.params())?;
        info!(
            "Mapped {} words over {} nodes",
            keys.count(true),
            trie.node_count()
        );

        Ok(Self { trie, keys })
    }

    pub fn trie(&self) -> &FrozenTrie {
        &self.trie
    }

    /// The number of words, i.e. the largest id.
    pub fn word_count(&self) -> usize {
        self.keys.count(true)
    }

    /// Returns the id of `word`, if `word` is in the trie.
    pub fn lookup_id(&self, word: &str) -> Option<DenseId> {
        let index = self.trie.lookup_exact(word)?;
        Some(self.keys.rank(true, index))
    }

    /// Returns the word with the given id. Letters that are not valid UTF-8 are decoded as in
    /// [`FrozenTrie::suggest`].
    pub fn reverse_lookup(&self, id: DenseId) -> Result<String> {
        ensure!(
            id >= 1 && id <= self.word_count(),
            "Id {} out of range 1..={}",
            id,
            self.word_count()
        );

        let shape = self.trie.shape();
        let mut index = self
            .keys
            .select(true, id)
            .with_context(|| format!("No final node for id {}", id))?;
        let mut letters = Vec::new();

        // climb to the root: the (index + 1)-th edge leads into the node, and the terminators
        // before it count the nodes preceding its parent
        while index > 0 {
            letters.push(self.trie.letter_at(index));
            let edge = shape
                .select(true, index + 1)
                .with_context(|| format!("No edge leading to node {}", index))?;
            index = shape.rank(false, edge) - 1;
        }

        letters.reverse();
        Ok(decode_word(&letters))
    }

    /// Returns every word, by increasing id.
    pub fn words(&self) -> impl Iterator<Item = Result<String>> + '_ {
        (1..=self.word_count()).map(|id| self.reverse_lookup(id))
    }

    /// Serializes the map into a flat buffer: the node count as a big-endian `u64`, the encoded
    /// trie, the directory over its shape, the final flags and the directory over them.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            HEADER_LEN
                + self.trie.data_bytes().len()
                + self.trie.directory_bytes().len()
                + self.keys.data_bytes().len()
                + self.keys.directory_bytes().len(),
        );

        bytes.extend_from_slice(&(self.trie.node_count() as u64).to_be_bytes());
        bytes.extend_from_slice(self.trie.data_bytes());
        bytes.extend_from_slice(self.trie.directory_bytes());
        bytes.extend_from_slice(self.keys.data_bytes());
        bytes.extend_from_slice(self.keys.directory_bytes());
        bytes
    }

    /// Rebuilds a map from the output of [`to_bytes`](Self::to_bytes). The block widths must be the
    /// ones the map was built with.
    pub fn from_bytes(bytes: &[u8], params: RankDirectoryParams) -> Result<Self> {
        params.validate()?;
        ensure!(bytes.len() >= HEADER_LEN, "Buffer too short to hold the node count");

        let (header, body) = bytes.split_at(HEADER_LEN);
        let header: [u8; HEADER_LEN] = header.try_into()?;
        let node_count = usize::try_from(u64::from_be_bytes(header))?;
        // every node takes at least two bits of shape
        ensure!(
            node_count <= body.len() * 4,
            "Node count {} does not fit in {} bytes",
            node_count,
            body.len()
        );

        let data_len = FrozenTrie::data_len(node_count);
        let shape_len = RankDirectory::directory_len(FrozenTrie::shape_bits(node_count), params);
        let keys_len = bytes_for_bits(node_count);
        let keys_directory_len = RankDirectory::directory_len(node_count, params);
        ensure!(
            body.len() == data_len + shape_len + keys_len + keys_directory_len,
            "A map with {} nodes takes {} bytes, found {}",
            node_count,
            HEADER_LEN + data_len + shape_len + keys_len + keys_directory_len,
            bytes.len()
        );

        let (data, body) = body.split_at(data_len);
        let (shape_directory, body) = body.split_at(shape_len);
        let (keys, keys_directory) = body.split_at(keys_len);

        let trie = FrozenTrie::with_directory(data.to_vec(), shape_directory.to_vec(), node_count, params)?;
        let keys = RankDirectory::from_parts(keys.to_vec(), keys_directory.to_vec(), node_count, params)?;

        for index in 0..node_count {
            ensure!(
                keys.data().bit(index) == trie.node(index)?.is_final(),
                "Final flag of node {} disagrees with the trie",
                index
            );
        }

        Ok(Self { trie, keys })
    }

    /// Writes the output of [`to_bytes`](Self::to_bytes) to `path`.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(
            File::create(path).with_context(|| format!("Could not create {}", path.display()))?,
        );
        file.write_all(&self.to_bytes())
            .with_context(|| format!("Could not write {}", path.display()))?;
        file.flush()?;
        Ok(())
    }

    /// Loads a map previously written with [`store`](Self::store).
    pub fn load(path: impl AsRef<Path>, params: RankDirectoryParams) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_bytes(&bytes, params)
            .with_context(|| format!("Could not decode {}", path.display()))
    }
}
