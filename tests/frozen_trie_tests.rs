mod common;

use std::collections::HashSet;

use anyhow::Result;
use rstest::{fixture, rstest};
use succinct_trie::prelude::*;

use crate::common::*;

/// The words of the sample trie as met by a pre-order visit: siblings keep insertion order.
const PRE_ORDER_WORDS: [&str; 7] = ["apple", "alphapha", "orange", "lamp", "hello", "jello", "quiz"];

#[fixture]
fn trie() -> FrozenTrie {
    init_logger();
    sample_trie(RankDirectoryParams::default())
}

#[rstest]
#[case("apple", true)]
#[case("appl", false)]
#[case("applea", false)]
#[case("orange", true)]
#[case("lamp", true)]
#[case("hello", true)]
#[case("jello", true)]
#[case("quiz", true)]
#[case("quize", false)]
#[case("alphaph", false)]
#[case("alphapha", true)]
#[case("", false)]
#[case("b", false)]
fn lookup_finds_only_inserted_words(trie: FrozenTrie, #[case] word: &str, #[case] expected: bool) {
    assert_eq!(trie.contains(word), expected, "{}", word);
    assert_eq!(trie.lookup_exact(word).is_some(), expected, "{}", word);
}

#[rstest]
#[case(8, 4)]
#[case(4, 2)]
#[case(16, 16)]
#[case(1024, 32)]
fn lookup_does_not_depend_on_block_widths(#[case] l1: usize, #[case] l2: usize) -> Result<()> {
    let trie = sample_trie(RankDirectoryParams::new(l1, l2)?);

    for word in WORDS {
        assert!(trie.contains(word), "{}", word);
    }
    assert!(!trie.contains("alphaph"));
    assert!(!trie.contains("quize"));
    Ok(())
}

#[rstest]
fn lookup_returns_level_order_index(trie: FrozenTrie) {
    assert_eq!(trie.node_count(), NODE_COUNT);
    assert_eq!(trie.lookup_exact("lamp"), Some(24));
    assert_eq!(trie.lookup_exact("quiz"), Some(27));
    assert_eq!(trie.lookup_exact("apple"), Some(28));
    assert_eq!(trie.lookup_exact("alphapha"), Some(36));
}

#[rstest]
fn suggestions_follow_encoded_order(trie: FrozenTrie) {
    assert_eq!(trie.suggested_words("a", 10), vec!["apple", "alphapha"]);
    assert!(trie.suggested_words("b", 10).is_empty());
    assert_eq!(trie.suggested_words("h", 10), vec!["hello"]);
    assert_eq!(trie.suggested_words("appl", 10), vec!["apple"]);
    assert_eq!(trie.suggested_words("apple", 10), vec!["apple"]);
    assert!(trie.suggested_words("applea", 10).is_empty());
}

#[rstest]
fn suggestions_respect_the_limit(trie: FrozenTrie) {
    assert_eq!(trie.suggested_words("", 100), PRE_ORDER_WORDS.to_vec());
    assert_eq!(trie.suggested_words("", 3), vec!["apple", "alphapha", "orange"]);
    assert_eq!(trie.suggested_words("a", 1), vec!["apple"]);
    assert!(trie.suggested_words("a", 0).is_empty());
}

#[rstest]
fn suggestions_are_lazy_and_restartable(trie: FrozenTrie) {
    let mut suggestions = trie.suggest("", usize::MAX);
    assert_eq!(suggestions.next().as_deref(), Some("apple"));
    assert_eq!(suggestions.next().as_deref(), Some("alphapha"));

    assert_eq!(trie.suggest("", usize::MAX).next().as_deref(), Some("apple"));
    assert_eq!(suggestions.count(), WORDS.len() - 2);
}

#[rstest]
fn nodes_decode_shape_and_payload(trie: FrozenTrie) -> Result<()> {
    let root = trie.root();
    assert_eq!(root.index(), 0);
    assert!(!root.is_final());
    assert_eq!(root.first_child(), 1);
    assert_eq!(root.child_count(), 6);

    let letters = root.children().map(|child| child.letter()).collect::<Vec<_>>();
    assert_eq!(letters, b"aolhjq".to_vec());

    let a = root.child(0)?;
    assert_eq!(a.index(), 1);
    assert_eq!(a.first_child(), 7);
    assert_eq!(a.child_count(), 2);
    assert_eq!(a.child(1)?.letter(), b'l');

    let lamp = trie.node(24)?;
    assert_eq!(lamp.letter(), b'p');
    assert!(lamp.is_final());
    assert_eq!(lamp.child_count(), 0);
    Ok(())
}

#[rstest]
fn out_of_range_navigation_fails(trie: FrozenTrie) {
    assert!(trie.root().child(6).is_err());
    assert!(trie.node(NODE_COUNT).is_err());
    assert!(trie.node(NODE_COUNT - 1).is_ok());
}

#[rstest]
fn level_order_visits_nodes_by_index(trie: FrozenTrie) {
    let mut indices = Vec::new();
    trie.traverse_level_order(|node| indices.push(node.index()));
    assert_eq!(indices, (0..NODE_COUNT).collect::<Vec<_>>());
}

#[rstest]
fn pre_order_visits_parents_first(trie: FrozenTrie) {
    let mut word = Vec::new();
    let mut words = Vec::new();
    let mut depths = vec![0_usize; NODE_COUNT];
    let mut visited = 0;

    trie.traverse_pre_order(|node| {
        visited += 1;
        let depth = depths[node.index()];
        for child in node.children() {
            depths[child.index()] = depth + 1;
        }
        if depth > 0 {
            word.truncate(depth - 1);
            word.push(node.letter());
        }
        if node.is_final() {
            words.push(String::from_utf8(word.clone()).unwrap());
        }
    });

    assert_eq!(visited, NODE_COUNT);
    assert_eq!(words, PRE_ORDER_WORDS.to_vec());
}

#[rstest]
fn last_key_follows_last_children(trie: FrozenTrie) {
    assert_eq!(trie.last_lexicographic_key(), "quiz");

    let sorted = {
        let mut words = WORDS.to_vec();
        words.sort();
        words.into_iter().collect::<TrieBuilder>().freeze().unwrap()
    };
    assert_eq!(sorted.last_lexicographic_key(), "quiz");
}

#[rstest]
fn queries_are_idempotent(trie: FrozenTrie) {
    for _ in 0..3 {
        assert_eq!(trie.lookup_exact("hello"), Some(31));
        assert_eq!(trie.suggested_words("a", 10), vec!["apple", "alphapha"]);
    }
}

#[test]
fn random_words_are_found() -> Result<()> {
    let words = random_words(0, 3000);
    let builder = words.iter().map(String::as_str).collect::<TrieBuilder>();
    let inserted = words.iter().cloned().collect::<HashSet<_>>();
    let trie = FrozenTrie::with_parameters(builder.encode().0, builder.node_count(), RankDirectoryParams::new(64, 8)?)?;

    for word in &words {
        assert!(trie.contains(word), "{}", word);
    }
    for word in random_words(1, 3000) {
        assert_eq!(trie.contains(&word), inserted.contains(&word), "{}", word);
    }

    let mut suggested = trie.suggested_words("", usize::MAX);
    let mut expected = inserted.into_iter().collect::<Vec<_>>();
    suggested.sort();
    expected.sort();
    assert_eq!(suggested, expected);
    Ok(())
}

#[test]
fn empty_word_is_stored_in_the_root() -> Result<()> {
    let trie = ["", "a"].into_iter().collect::<TrieBuilder>().freeze()?;
    assert!(trie.contains(""));
    assert!(trie.contains("a"));
    assert_eq!(trie.suggested_words("", 10), vec!["", "a"]);
    Ok(())
}

#[test]
fn trie_is_shared_between_threads() {
    let trie = sample_trie(RankDirectoryParams::new(8, 4).unwrap());
    let trie = &trie;

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    WORDS
                        .iter()
                        .map(|word| (trie.lookup_exact(word), trie.suggested_words(&word[..1], 10)))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let expected = WORDS
            .iter()
            .map(|word| (trie.lookup_exact(word), trie.suggested_words(&word[..1], 10)))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn malformed_buffers_are_rejected() {
    let builder = sample_builder();
    let (data, _) = builder.encode();

    // wrong node count
    assert!(FrozenTrie::new(data.clone(), NODE_COUNT + 1).is_err());
    assert!(FrozenTrie::new(data.clone(), 0).is_err());

    // truncated buffer
    assert!(FrozenTrie::new(data[..data.len() - 1].to_vec(), NODE_COUNT).is_err());

    // missing super-root
    let mut corrupted = data.clone();
    corrupted[0] &= 0b0111_1111;
    assert!(FrozenTrie::new(corrupted, NODE_COUNT).is_err());

    // the second node lists itself as its own child
    let mut writer = BitWriter::new();
    writer.write(0b10_0_10, 5);
    writer.write(0, 2 * PAYLOAD_WIDTH);
    assert!(FrozenTrie::new(writer.into_bytes(), 2).is_err());

    // too few edges
    let mut writer = BitWriter::new();
    writer.write(0b10_0_0_0, 5);
    writer.write(0, 2 * PAYLOAD_WIDTH);
    assert!(FrozenTrie::new(writer.into_bytes(), 2).is_err());

    assert!(FrozenTrie::new(data, NODE_COUNT).is_ok());
}

#[test]
fn directory_can_be_transmitted_with_the_trie() -> Result<()> {
    let params = RankDirectoryParams::new(16, 4)?;
    let trie = sample_trie(params);
    let received = FrozenTrie::with_directory(
        trie.data_bytes().to_vec(),
        trie.directory_bytes().to_vec(),
        trie.node_count(),
        params,
    )?;

    for word in WORDS {
        assert_eq!(received.lookup_exact(word), trie.lookup_exact(word));
    }
    assert!(FrozenTrie::with_directory(trie.data_bytes().to_vec(), Vec::new(), trie.node_count(), params).is_err());
    Ok(())
}

#[test]
fn corrupted_directories_are_rejected() -> Result<()> {
    let params = RankDirectoryParams::new(8, 4)?;
    let trie = sample_trie(params);
    let directory = trie.directory_bytes().to_vec();

    for bit in 0..directory.len() * 8 {
        let mut corrupted = directory.clone();
        corrupted[bit / 8] ^= 0x80 >> (bit % 8);
        assert!(
            FrozenTrie::with_directory(trie.data_bytes().to_vec(), corrupted, trie.node_count(), params).is_err(),
            "flipping directory bit {} was accepted",
            bit
        );
    }
    Ok(())
}
