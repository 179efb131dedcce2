use super::pattern::IntoPattern;
use super::scalar::TrieScalar;

/// Index of the root state in the packed arrays.
pub const ROOT_INDEX: usize = 0;

/// Base value of the root state, fixed by convention.
pub(crate) const ROOT_BASE: isize = 1;

/// The packed double-array trie: two parallel integer arrays.
///
/// A state with base offset `b` keeps its outgoing transition for scalar
/// code `c` at index `b + c + 1`; index `b + 0` is reserved for the
/// end-of-pattern marker of that state. `check[p]` records the base offset
/// of the state owning slot `p` (`0` means the slot is free), and a
/// negative `base[p]` marks a terminal state. The root lives at index
/// [`ROOT_INDEX`] with `base = 1`.
///
/// The arrays are written once during construction and never mutated
/// afterwards, so a built `PackedTrie` can be queried concurrently from any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct PackedTrie {
    pub(crate) base: Vec<isize>,
    pub(crate) check: Vec<isize>,
}

impl PackedTrie {
    /// Grows both arrays to `new_len`, zero-filling the new slots.
    pub(crate) fn resize(&mut self, new_len: usize) {
        debug_assert!(new_len >= self.base.len());
        self.base.resize(new_len, 0);
        self.check.resize(new_len, 0);
    }

    /// The `base` array: per-state offsets, negative for terminal states.
    #[inline]
    pub fn base(&self) -> &[isize] {
        &self.base
    }

    /// The `check` array: per-slot owner records, `0` for free slots.
    #[inline]
    pub fn check(&self) -> &[isize] {
        &self.check
    }

    /// Length of the packed arrays.
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// True if the arrays are empty (only before construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Exact-match traversal starting from the state at array index `start`.
    ///
    /// Returns true only if the whole pattern is consumed and the reached
    /// state is terminal. Out-of-range indices, unowned transitions, and
    /// non-terminal end states all fold into `false`; a non-match is never
    /// an error. `start` is [`ROOT_INDEX`] for a full-pattern match, or a
    /// previously reached transition slot to resume from a sub-state.
    ///
    /// # Examples
    ///
    /// ```
    /// use libdatrie::{build_trie, ROOT_INDEX};
    ///
    /// let trie = build_trie(["cat", "car", "dog"]).unwrap();
    /// assert!(trie.packed().exact_match("cat", ROOT_INDEX));
    /// assert!(!trie.packed().exact_match("ca", ROOT_INDEX));
    /// ```
    pub fn exact_match<C, P>(&self, pattern: P, start: usize) -> bool
    where
        C: TrieScalar,
        P: IntoPattern<C>,
    {
        self.exact_match_scalars(&pattern.collect_pattern(), start)
    }

    /// Exact-match traversal over an already decomposed scalar sequence.
    pub fn exact_match_scalars<C: TrieScalar>(&self, scalars: &[C], start: usize) -> bool {
        let mut state = start;
        for &c in scalars {
            match self.step(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }

        let Some(&b) = self.base.get(state) else {
            return false;
        };
        if b < 0 {
            return false;
        }
        let p = b as usize;
        p < self.check.len() && self.check[p] == b && self.base[p] < 0
    }

    /// Follows the transition for one scalar out of the state at array
    /// index `state`.
    ///
    /// Returns the index of the reached state, or `None` when the state has
    /// no transition for `scalar` (including when `state` is out of range).
    /// The returned index can be fed back into `step` or used as the
    /// `start` of [`exact_match`](PackedTrie::exact_match) to resume a scan
    /// without re-walking the consumed prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use libdatrie::{build_trie, ROOT_INDEX};
    ///
    /// let trie = build_trie(["cat", "car"]).unwrap();
    /// let packed = trie.packed();
    ///
    /// let state = packed.step(ROOT_INDEX, 'c').unwrap();
    /// assert!(packed.exact_match("at", state));
    /// assert!(packed.step(ROOT_INDEX, 'x').is_none());
    /// ```
    pub fn step<C: TrieScalar>(&self, state: usize, scalar: C) -> Option<usize> {
        let &b = self.base.get(state)?;
        if b < 0 {
            return None;
        }
        let p = b as usize + scalar.code() + 1;
        (p < self.check.len() && self.check[p] == b).then_some(p)
    }
}
