//! The frozen trie, its node views and the word/id mapping built on top of it.

pub mod frozen;
pub mod map;
pub mod node;
pub mod suggestions;

/// Turns the letters met along a path into a word. Invalid UTF-8 sequences become U+FFFD, so
/// every query reading words back reports the same text for the same bytes.
pub(crate) fn decode_word(letters: &[u8]) -> String {
    String::from_utf8_lossy(letters).into_owned()
}
