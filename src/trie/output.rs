use hashbrown::HashMap;

use super::scalar::TrieScalar;
use super::virtual_trie::PartialKey;

/// Map from packed-array terminal slot to the pattern that ends there.
///
/// Populated during construction, one entry per terminal slot, so the
/// matched pattern can be recovered from a slot index without re-walking
/// the original pattern list. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct OutputTable<C: TrieScalar> {
    entries: HashMap<usize, PartialKey<C>>,
}

impl<C: TrieScalar> OutputTable<C> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        OutputTable {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, slot: usize, key: PartialKey<C>) {
        self.entries.insert(slot, key);
    }

    /// Returns the pattern ending at `slot`, if `slot` is a terminal.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&[C]> {
        self.entries.get(&slot).map(|key| key.as_slice())
    }

    /// Number of terminal slots, i.e. the number of distinct patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table holds no entries (only before construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(terminal slot, pattern)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[C])> {
        self.entries.iter().map(|(&slot, key)| (slot, key.as_slice()))
    }
}
