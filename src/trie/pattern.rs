use smallvec::SmallVec;

use super::scalar::TrieScalar;

/// Buffer a single pattern is collected into before construction or lookup.
pub type PatternBuf<C> = SmallVec<[C; 32]>;

/// Trait for types that can be used as a pattern.
///
/// Implemented for common string and sequence types so that
/// [`build_trie`](super::packer::build_trie) and
/// [`exact_match`](super::packed::PackedTrie::exact_match) accept them
/// directly without manual conversion.
pub trait IntoPattern<C: TrieScalar> {
    /// Collects this pattern into a scalar buffer.
    fn collect_pattern(self) -> PatternBuf<C>;
}

// String types → char

impl IntoPattern<char> for &str {
    fn collect_pattern(self) -> PatternBuf<char> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &&str {
    fn collect_pattern(self) -> PatternBuf<char> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for String {
    fn collect_pattern(self) -> PatternBuf<char> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &String {
    fn collect_pattern(self) -> PatternBuf<char> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: TrieScalar> IntoPattern<C> for &[C] {
    fn collect_pattern(self) -> PatternBuf<C> {
        self.iter().copied().collect()
    }
}

impl<C: TrieScalar> IntoPattern<C> for Vec<C> {
    fn collect_pattern(self) -> PatternBuf<C> {
        self.into_iter().collect()
    }
}

impl<C: TrieScalar> IntoPattern<C> for &Vec<C> {
    fn collect_pattern(self) -> PatternBuf<C> {
        self.iter().copied().collect()
    }
}

impl<C: TrieScalar, const N: usize> IntoPattern<C> for [C; N] {
    fn collect_pattern(self) -> PatternBuf<C> {
        self.into_iter().collect()
    }
}

impl<C: TrieScalar, const N: usize> IntoPattern<C> for &[C; N] {
    fn collect_pattern(self) -> PatternBuf<C> {
        self.iter().copied().collect()
    }
}
