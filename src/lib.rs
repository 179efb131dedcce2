//! # libdatrie
//!
//! A compact [double-array trie](https://linux.thai.net/~thep/datrie/):
//! a prefix tree encoded as two parallel integer arrays (`base`, `check`)
//! where transitions are computed by arithmetic offset instead of pointer
//! chasing, giving O(pattern length) exact-match lookup with far less
//! memory than a pointer-based trie.
//!
//! Construction packs the trie recursively: a transient "virtual" trie
//! represents each node as a contiguous range into the sorted pattern list,
//! and the packer finds a collision-free base offset for every sibling
//! group. Once built, the trie is immutable and safe to query concurrently.
//!
//! ## Quick start
//!
//! ```
//! use libdatrie::build_trie;
//!
//! let trie = build_trie(["cat", "car", "dog"]).unwrap();
//!
//! assert!(trie.contains("cat"));
//! assert!(trie.contains("dog"));
//! assert!(!trie.contains("ca"));     // prefixes don't match
//! assert!(!trie.contains("cats"));   // extensions don't match
//! ```
//!
//! Patterns are decomposed into Unicode scalar values, so non-ASCII input
//! works out of the box:
//!
//! ```
//! use libdatrie::build_trie;
//!
//! let trie = build_trie(["授人以鱼", "授人以渔"]).unwrap();
//! assert!(trie.contains("授人以渔"));
//! assert!(!trie.contains("授人以"));
//! ```
//!
//! ## Generic usage
//!
//! The trie is generic over the scalar type via [`TrieScalar`], so byte or
//! integer sequences work the same way:
//!
//! ```
//! use libdatrie::build_trie;
//!
//! let patterns: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3]];
//! let trie = build_trie(patterns).unwrap();
//! assert!(trie.contains([1u8, 2, 3]));
//! assert!(!trie.contains([1u8, 2]));
//! ```
//!
//! ## Inspecting the built structure
//!
//! [`DoubleArrayTrie`] exposes the raw arrays, the terminal-slot output
//! table, and the expanded construction trie:
//!
//! ```
//! use libdatrie::build_trie;
//!
//! let trie = build_trie(["ab", "ac"]).unwrap();
//! // Every terminal slot maps back to the pattern ending there.
//! let mut patterns: Vec<String> = trie
//!     .output()
//!     .iter()
//!     .map(|(_, key)| key.iter().collect())
//!     .collect();
//! patterns.sort();
//! assert_eq!(patterns, ["ab", "ac"]);
//! ```

#![warn(missing_docs)]

/// Core double-array trie: construction pipeline, packed arrays, traversal.
pub mod trie;

pub use trie::{
    build_trie, build_trie_from_file, BuildError, DoubleArrayTrie, IntoPattern, OutputTable,
    PackedTrie, TrieScalar, VirtualTrie, VirtualTrieNode, ROOT_INDEX,
};

#[cfg(test)]
mod proptests;
