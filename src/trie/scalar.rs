use std::fmt::Debug;

/// Trait for scalar types that patterns are decomposed into.
///
/// A scalar is the atomic unit of a pattern: a Unicode scalar value for
/// string patterns, or a raw integer for byte/code sequences. The packed
/// trie computes a transition slot for a scalar by arithmetic offset, so
/// every scalar must map to a numeric code.
///
/// # Contract
///
/// `Ord` must agree with [`code`](TrieScalar::code): `a < b` if and only if
/// `a.code() < b.code()`. Construction sorts patterns with `Ord` and then
/// groups siblings by `code`; an implementation where the two disagree will
/// make the builder report the pattern set as malformed.
pub trait TrieScalar: Copy + Eq + Ord + Debug {
    /// Numeric code of this scalar, used to compute transition slots.
    fn code(self) -> usize;
}

impl TrieScalar for char {
    #[inline]
    fn code(self) -> usize {
        self as usize
    }
}

impl TrieScalar for u8 {
    #[inline]
    fn code(self) -> usize {
        self as usize
    }
}

impl TrieScalar for u16 {
    #[inline]
    fn code(self) -> usize {
        self as usize
    }
}

impl TrieScalar for u32 {
    #[inline]
    fn code(self) -> usize {
        self as usize
    }
}
