use smallvec::SmallVec;

use super::packer::BuildError;
use super::pattern::PatternBuf;
use super::scalar::TrieScalar;

/// Accumulated root-to-node scalar path.
pub type PartialKey<C> = SmallVec<[C; 8]>;

/// One node of the transient trie used during construction.
///
/// A node does not store the patterns below it; it stores the half-open
/// range `[left, right)` into the sorted pattern list of all patterns that
/// share its prefix. Children are computed lazily from that range by
/// [`expand`](VirtualTrieNode::expand) and partition it exactly: no gaps,
/// no overlaps, their union is the parent's range.
///
/// After packing, each node additionally records the packed-array slot it
/// was assigned and the base value written there, so the fully expanded
/// tree can be inspected alongside the packed arrays.
#[derive(Debug, Clone)]
pub struct VirtualTrieNode<C: TrieScalar> {
    /// Scalar code plus one; `0` means "pattern ends here".
    pub(crate) code: usize,
    /// Number of scalars consumed to reach this node.
    pub(crate) depth: usize,
    /// Start of this node's range into the sorted pattern list.
    pub(crate) left: usize,
    /// End (exclusive) of this node's range.
    pub(crate) right: usize,
    /// Packed-array index assigned during placement.
    pub(crate) slot: Option<usize>,
    /// Base value written at `slot` (`-1` for terminals).
    pub(crate) base: Option<isize>,
    pub(crate) partial_key: PartialKey<C>,
    pub(crate) children: Vec<VirtualTrieNode<C>>,
}

impl<C: TrieScalar> VirtualTrieNode<C> {
    /// Creates the root node covering the whole sorted pattern list.
    pub(crate) fn root(pattern_count: usize) -> Self {
        VirtualTrieNode {
            code: 0,
            depth: 0,
            left: 0,
            right: pattern_count,
            slot: Some(super::packed::ROOT_INDEX),
            base: None,
            partial_key: PartialKey::new(),
            children: Vec::new(),
        }
    }

    /// Expands this node into its sibling group of children.
    ///
    /// Scans `[left, right)` of `keys` and groups contiguous patterns by
    /// their scalar code at `depth` (code `0` when a pattern ends exactly at
    /// this prefix). `keys` must be sorted, so the codes encountered are
    /// non-decreasing; a decreasing code means the caller handed over
    /// unsorted pattern data and fails with [`BuildError::CodeOrder`].
    ///
    /// The produced children are appended to `self.children`, each with its
    /// own sub-range and the parent's partial key extended by the new scalar
    /// (end-of-pattern children keep the parent's key unchanged).
    pub(crate) fn expand(&mut self, keys: &[PatternBuf<C>]) -> Result<(), BuildError> {
        debug_assert!(self.children.is_empty(), "node expanded twice");

        let mut prev = 0usize;

        for i in self.left..self.right {
            let key = &keys[i];
            if key.len() < self.depth {
                continue;
            }

            let curr = if key.len() == self.depth {
                0
            } else {
                key[self.depth].code() + 1
            };

            if prev > curr {
                return Err(BuildError::CodeOrder {
                    depth: self.depth,
                    prev,
                    curr,
                });
            }

            if curr != prev || self.children.is_empty() {
                let mut partial_key = self.partial_key.clone();
                if curr != 0 {
                    partial_key.push(key[self.depth]);
                }

                // The new group starts at i, which is where the previous
                // group's range ends.
                if let Some(last) = self.children.last_mut() {
                    last.right = i;
                }

                self.children.push(VirtualTrieNode {
                    code: curr,
                    depth: self.depth + 1,
                    left: i,
                    right: self.right,
                    slot: None,
                    base: None,
                    partial_key,
                    children: Vec::new(),
                });
            }

            prev = curr;
        }

        if let Some(last) = self.children.last_mut() {
            last.right = self.right;
        }

        Ok(())
    }

    /// Scalar code plus one; `0` marks the end of a pattern.
    #[inline]
    pub fn code(&self) -> usize {
        self.code
    }

    /// Trie depth of this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Half-open range `[left, right)` into the sorted pattern list.
    #[inline]
    pub fn range(&self) -> (usize, usize) {
        (self.left, self.right)
    }

    /// Scalar path from the root to this node.
    #[inline]
    pub fn partial_key(&self) -> &[C] {
        &self.partial_key
    }

    /// Children of this node, in ascending code order.
    #[inline]
    pub fn children(&self) -> &[VirtualTrieNode<C>] {
        &self.children
    }

    /// Packed-array index assigned to this node, once placed.
    #[inline]
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Base value recorded for this node, once placed (`-1` for terminals).
    #[inline]
    pub fn base(&self) -> Option<isize> {
        self.base
    }

    /// True if this node marks the end of a pattern.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.code == 0 && self.depth > 0
    }
}

/// The fully expanded construction trie, kept for inspection.
///
/// Only the packed arrays are needed for matching; this structure records
/// the prefix ranges, partial keys, and placement decisions the packer made.
#[derive(Debug, Clone)]
pub struct VirtualTrie<C: TrieScalar> {
    pub(crate) root: VirtualTrieNode<C>,
}

impl<C: TrieScalar> VirtualTrie<C> {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &VirtualTrieNode<C> {
        &self.root
    }

    /// Total number of nodes in the expanded trie, excluding the root.
    pub fn node_count(&self) -> usize {
        fn count<C: TrieScalar>(node: &VirtualTrieNode<C>) -> usize {
            node.children.len() + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}
