/// Map from terminal slots to the patterns ending there.
pub mod output;
/// The packed `base`/`check` arrays and exact-match traversal.
pub mod packed;
/// Construction: the placement algorithm, build entry points, and errors.
pub mod packer;
/// Trait for converting strings and sequences into patterns.
pub mod pattern;
/// Trait for scalar types that patterns decompose into.
pub mod scalar;
/// The transient range-based trie expanded during construction.
pub mod virtual_trie;

pub use output::OutputTable;
pub use packed::{PackedTrie, ROOT_INDEX};
pub use packer::{build_trie, build_trie_from_file, BuildError, DoubleArrayTrie};
pub use pattern::IntoPattern;
pub use scalar::TrieScalar;
pub use virtual_trie::{VirtualTrie, VirtualTrieNode};
