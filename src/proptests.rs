use proptest::prelude::*;

use crate::trie::packer::{build_from_keys, build_trie, BuildError, DoubleArrayTrie};
use crate::trie::packed::ROOT_INDEX;
use crate::trie::pattern::{IntoPattern, PatternBuf};

/// Structural invariants of a built trie, independent of any particular
/// pattern set.
fn validate_trie(trie: &DoubleArrayTrie<u8>, patterns: &[Vec<u8>]) {
    let packed = trie.packed();
    let base = packed.base();
    let check = packed.check();
    assert_eq!(base.len(), check.len(), "base and check must grow together");
    assert_eq!(base[ROOT_INDEX], 1, "root base convention");

    // Every occupied slot has exactly one owner, and the owner's base
    // offset actually reaches the slot.
    for p in 1..check.len() {
        let owner = check[p];
        if owner != 0 {
            assert!(owner > 0, "check values are base offsets, never negative");
            assert!(owner as usize <= p, "slot must be owner base + code");
        }
    }

    // Terminal slots carry negative base values and every output-table
    // entry points at one.
    for (slot, _) in trie.output().iter() {
        assert!(check[slot] != 0, "terminal slot must be occupied");
        assert!(base[slot] < 0, "terminal slot must have negative base");
    }

    // The output table recovers exactly the distinct input patterns.
    let mut distinct: Vec<Vec<u8>> = patterns.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    let mut recovered: Vec<Vec<u8>> = trie.output().iter().map(|(_, key)| key.to_vec()).collect();
    recovered.sort_unstable();
    assert_eq!(recovered, distinct);
    assert_eq!(trie.len(), distinct.len());

    // Child ranges partition each parent's range exactly.
    let mut stack = vec![trie.virtual_trie().root()];
    while let Some(node) = stack.pop() {
        if node.children().is_empty() {
            continue;
        }
        let (left, right) = node.range();
        let mut expected_left = left;
        for child in node.children() {
            let (child_left, child_right) = child.range();
            assert_eq!(child_left, expected_left, "ranges must not gap or overlap");
            assert!(child_left < child_right, "ranges must be non-empty");
            expected_left = child_right;
            stack.push(child);
        }
        assert_eq!(expected_left, right, "ranges must cover the parent");
    }
}

/// Mutates a pattern into near misses that differ from it in exactly one
/// place; used to probe for false positives.
fn near_misses(pattern: &[u8]) -> Vec<Vec<u8>> {
    let mut misses = Vec::new();
    let mut extended = pattern.to_vec();
    extended.push(1);
    misses.push(extended);
    if !pattern.is_empty() {
        misses.push(pattern[..pattern.len() - 1].to_vec());
        let mut flipped = pattern.to_vec();
        let last = flipped.len() - 1;
        flipped[last] = if flipped[last] == u8::MAX { 1 } else { flipped[last] + 1 };
        misses.push(flipped);
    }
    misses
}

fn pattern_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // Scalar 0 is a valid label for the trie (codes are offset by one), but
    // realistic string patterns never contain NUL; keep a small alphabet so
    // patterns share prefixes often.
    prop::collection::vec(1u8..=16, 0..=8)
}

fn pattern_set_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(pattern_strategy(), 1..=50)
}

proptest! {
    #[test]
    fn round_trip_and_structure(patterns in pattern_set_strategy()) {
        let trie = build_trie(patterns.clone()).unwrap();

        for pattern in &patterns {
            prop_assert!(trie.contains(pattern), "built pattern must match: {pattern:?}");
        }

        for pattern in &patterns {
            for miss in near_misses(pattern) {
                if !patterns.contains(&miss) {
                    prop_assert!(!trie.contains(&miss), "false positive: {miss:?}");
                }
            }
        }

        validate_trie(&trie, &patterns);
    }

    #[test]
    fn permutations_accept_the_same_language(
        (patterns, shuffled) in pattern_set_strategy()
            .prop_flat_map(|patterns| (Just(patterns.clone()), Just(patterns).prop_shuffle())),
    ) {
        let trie = build_trie(patterns.clone()).unwrap();
        let reshuffled = build_trie(shuffled).unwrap();

        let mut probes: Vec<Vec<u8>> = patterns.clone();
        for pattern in &patterns {
            probes.extend(near_misses(pattern));
        }
        for probe in &probes {
            prop_assert_eq!(trie.contains(probe), reshuffled.contains(probe));
        }
    }

    // Unsorted input never reaches the packer through the public API, but
    // the grouping step's order check must hold up under adversarial input
    // anyway: duplicate-heavy and shuffled key lists either build correctly
    // or fail with CodeOrder, and never panic or loop.
    #[test]
    fn unsorted_keys_fail_cleanly_or_build(patterns in pattern_set_strategy()) {
        let keys: Vec<PatternBuf<u8>> = patterns
            .iter()
            .map(|p| p.as_slice().collect_pattern())
            .collect();
        let sorted = keys.windows(2).all(|w| w[0] <= w[1]);

        match build_from_keys(keys) {
            Ok(trie) => {
                // A list can slip through the grouping check when its local
                // code order happens to be consistent; a sorted list must
                // always build and accept everything.
                if sorted {
                    for pattern in &patterns {
                        prop_assert!(trie.contains(pattern));
                    }
                }
            }
            Err(err) => {
                prop_assert!(!sorted, "sorted keys must never fail: {err}");
                let is_code_order = matches!(err, BuildError::CodeOrder { .. });
                prop_assert!(is_code_order, "unexpected error variant: {err}");
            }
        }
    }
}
