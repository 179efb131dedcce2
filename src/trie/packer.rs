use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::output::OutputTable;
use super::packed::{PackedTrie, ROOT_BASE, ROOT_INDEX};
use super::pattern::{IntoPattern, PatternBuf};
use super::scalar::TrieScalar;
use super::virtual_trie::{VirtualTrie, VirtualTrieNode};

/// Fixed growth delta added when a placement forces the arrays to grow,
/// amortizing repeated small grows.
const RESIZE_DELTA: usize = 64;

/// Occupancy ratio at which the scan cursor is advanced past a dense region.
const OCCUPANCY_THRESHOLD: f64 = 0.95;

/// Base value recorded on terminal virtual nodes.
const TERMINAL_BASE: isize = -1;

/// Errors that can occur when building a double-array trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The pattern set was empty; there is nothing to build.
    EmptyPatterns,
    /// A decreasing scalar code was observed while grouping siblings.
    ///
    /// The grouping step requires the pattern list it scans to be sorted,
    /// so a code smaller than its predecessor means the list handed to it
    /// was unsorted or otherwise inconsistent. `prev` and `curr` are the
    /// offending codes (scalar value plus one, `0` for end-of-pattern) at
    /// the given trie depth.
    CodeOrder {
        /// Trie depth at which the decreasing code was seen.
        depth: usize,
        /// Code of the previous pattern at that depth.
        prev: usize,
        /// The smaller code that followed it.
        curr: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyPatterns => {
                write!(f, "cannot build a double-array trie from an empty pattern set")
            }
            BuildError::CodeOrder { depth, prev, curr } => write!(
                f,
                "scalar codes out of order at depth {depth}: {curr} follows {prev}"
            ),
        }
    }
}

impl Error for BuildError {}

/// The recursive placement algorithm and its shared construction state.
///
/// All state here (the growing arrays, the claimed-base marks, and the
/// scan cursor) is threaded through the whole recursive descent, which is
/// why construction is strictly sequential. Everything except the packed
/// arrays and the output table is discarded when `build_trie` returns.
pub(crate) struct ArrayPacker<C: TrieScalar> {
    keys: Vec<PatternBuf<C>>,
    trie: PackedTrie,
    output: OutputTable<C>,
    /// Base offsets already claimed by some sibling group. Prevents two
    /// groups from sharing a base even when their slots don't collide.
    used: Vec<bool>,
    /// Where the next free-slot scan starts; advanced past dense regions.
    next_check_pos: usize,
}

impl<C: TrieScalar> ArrayPacker<C> {
    fn new(keys: Vec<PatternBuf<C>>) -> Self {
        let mut packer = ArrayPacker {
            output: OutputTable::with_capacity(keys.len()),
            keys,
            trie: PackedTrie::default(),
            used: Vec::new(),
            next_check_pos: 0,
        };
        packer.grow(RESIZE_DELTA);
        packer
    }

    /// Grows the packed arrays and the claimed-base marks together.
    fn grow(&mut self, new_len: usize) {
        self.trie.resize(new_len);
        self.used.resize(new_len, false);
    }

    /// Places one sibling group into the packed arrays and recurses.
    ///
    /// Scans from the cursor for a `begin` such that every sibling's slot
    /// `begin + code` is free and `begin` itself is unclaimed, claims the
    /// slots, then expands each sibling in turn: terminals get a negative
    /// base and an output-table entry, inner nodes get the `begin` chosen
    /// for their own children. Returns this group's `begin` so the caller
    /// can record it as the parent's base.
    fn place(&mut self, siblings: &mut [VirtualTrieNode<C>]) -> Result<usize, BuildError> {
        debug_assert!(!siblings.is_empty());

        let first_code = siblings[0].code;
        let last_code = siblings[siblings.len() - 1].code;

        let mut pos = usize::max(first_code + 1, self.next_check_pos) - 1;
        let mut occupied = 0usize;
        let mut first_free_seen = false;

        let begin = 'scan: loop {
            pos += 1;
            if self.trie.len() <= pos {
                self.grow(pos + 1);
            }

            if self.trie.check[pos] > 0 {
                occupied += 1;
                continue;
            }

            if !first_free_seen {
                self.next_check_pos = pos;
                first_free_seen = true;
            }

            let begin = pos - first_code;
            if self.trie.len() <= begin + last_code {
                self.grow(begin + last_code + RESIZE_DELTA);
            }

            if self.used[begin] {
                continue;
            }

            for sibling in &siblings[1..] {
                if self.trie.check[begin + sibling.code] != 0 {
                    continue 'scan;
                }
            }

            break begin;
        };

        // Only move the global cursor forward when the scanned region was
        // almost entirely occupied; otherwise later groups may still fit in
        // the holes behind `pos`.
        if occupied as f64 / (pos - self.next_check_pos + 1) as f64 >= OCCUPANCY_THRESHOLD {
            self.next_check_pos = pos;
        }

        self.used[begin] = true;
        for sibling in siblings.iter() {
            self.trie.check[begin + sibling.code] = begin as isize;
        }

        for sibling in siblings.iter_mut() {
            sibling.expand(&self.keys)?;
            let slot = begin + sibling.code;

            if sibling.children.is_empty() {
                // Terminal: the magnitude records the pattern's position in
                // the sorted list, for output recovery.
                self.trie.base[slot] = -(sibling.left as isize) - 1;
                self.output.record(slot, sibling.partial_key.clone());
                sibling.slot = Some(slot);
                sibling.base = Some(TERMINAL_BASE);
            } else {
                let child_begin = self.place(&mut sibling.children)?;
                self.trie.base[slot] = child_begin as isize;
                sibling.slot = Some(slot);
                sibling.base = Some(child_begin as isize);
            }
        }

        Ok(begin)
    }
}

/// A built double-array trie: the packed arrays plus the auxiliary
/// structures produced alongside them.
///
/// Everything in here is immutable after construction and safe to share
/// across threads.
///
/// # Examples
///
/// ```
/// use libdatrie::build_trie;
///
/// let trie = build_trie(["cat", "car", "dog"]).unwrap();
/// assert!(trie.contains("cat"));
/// assert!(trie.contains("dog"));
/// assert!(!trie.contains("ca"));
/// assert!(!trie.contains("cats"));
/// ```
#[derive(Debug, Clone)]
pub struct DoubleArrayTrie<C: TrieScalar> {
    packed: PackedTrie,
    output: OutputTable<C>,
    virtual_trie: VirtualTrie<C>,
}

impl<C: TrieScalar> DoubleArrayTrie<C> {
    /// True if `pattern` is one of the built patterns.
    pub fn contains<P: IntoPattern<C>>(&self, pattern: P) -> bool {
        self.packed.exact_match(pattern, ROOT_INDEX)
    }

    /// The packed `base`/`check` arrays used for matching.
    #[inline]
    pub fn packed(&self) -> &PackedTrie {
        &self.packed
    }

    /// The terminal-slot → pattern table.
    #[inline]
    pub fn output(&self) -> &OutputTable<C> {
        &self.output
    }

    /// The fully expanded construction trie, for inspection.
    #[inline]
    pub fn virtual_trie(&self) -> &VirtualTrie<C> {
        &self.virtual_trie
    }

    /// Number of distinct patterns the trie accepts.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Always false: building requires a non-empty pattern set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

/// Builds a double-array trie from a collection of patterns.
///
/// Each pattern can be any type implementing [`IntoPattern`]: `&str`,
/// `String`, scalar slices, vectors, or fixed-size arrays. The patterns
/// need not be sorted or unique: they are decomposed into scalar sequences
/// and sorted here, and duplicates collapse into a single terminal.
///
/// # Errors
///
/// Returns [`BuildError::EmptyPatterns`] when the collection is empty.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libdatrie::build_trie;
///
/// let trie = build_trie(["dog", "cat", "car"]).unwrap();
/// assert!(trie.contains("car"));
/// assert!(!trie.contains("cow"));
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libdatrie::build_trie;
///
/// let patterns: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3]];
/// let trie = build_trie(patterns).unwrap();
/// assert!(trie.contains([1u8, 2, 3]));
/// assert!(!trie.contains([1u8, 2]));
/// ```
pub fn build_trie<C, P>(
    patterns: impl IntoIterator<Item = P>,
) -> Result<DoubleArrayTrie<C>, BuildError>
where
    C: TrieScalar,
    P: IntoPattern<C>,
{
    let mut keys: Vec<PatternBuf<C>> = patterns
        .into_iter()
        .map(IntoPattern::collect_pattern)
        .collect();
    keys.sort_unstable();
    build_from_keys(keys)
}

/// Builds from already decomposed keys without sorting them.
///
/// The public entry points sort first; tests call this directly to probe
/// how the pipeline reacts to unsorted input.
pub(crate) fn build_from_keys<C: TrieScalar>(
    keys: Vec<PatternBuf<C>>,
) -> Result<DoubleArrayTrie<C>, BuildError> {
    if keys.is_empty() {
        return Err(BuildError::EmptyPatterns);
    }

    let mut packer = ArrayPacker::new(keys);
    packer.trie.base[ROOT_INDEX] = ROOT_BASE;

    let mut root = VirtualTrieNode::root(packer.keys.len());
    root.expand(&packer.keys)?;
    // No slot is occupied yet, so the first scan always lands the
    // top-level group at begin == ROOT_BASE.
    let begin = packer.place(&mut root.children)?;
    debug_assert_eq!(begin as isize, ROOT_BASE);
    root.base = Some(begin as isize);

    Ok(DoubleArrayTrie {
        packed: packer.trie,
        output: packer.output,
        virtual_trie: VirtualTrie { root },
    })
}

/// Builds a double-array trie from a text file, one pattern per line.
///
/// Empty lines are skipped and lines starting with `#` are treated as
/// comments. The file does not need to be sorted.
///
/// # Examples
///
/// ```no_run
/// use libdatrie::build_trie_from_file;
///
/// let trie = build_trie_from_file("dictionary.txt").unwrap();
/// assert!(trie.contains("example"));
/// ```
pub fn build_trie_from_file(path: &str) -> Result<DoubleArrayTrie<char>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut patterns: Vec<String> = Vec::new();

    // Calling read_line repeatedly reuses one buffer instead of allocating
    // a fresh string per line; only kept lines are copied out.
    let mut buf = String::with_capacity(80);
    loop {
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        let line = buf.trim_end();
        if !line.is_empty() && !is_comment(line) {
            patterns.push(line.to_owned());
        }
        buf.clear();
    }

    Ok(build_trie(patterns)?)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn empty_pattern_set_is_an_error() {
        let patterns: [&str; 0] = [];
        assert_eq!(build_trie(patterns).unwrap_err(), BuildError::EmptyPatterns);
    }

    #[test]
    fn unsorted_input_is_sorted_before_building() {
        let trie = build_trie(["zebra", "apple", "mango"]).unwrap();
        assert!(trie.contains("zebra"));
        assert!(trie.contains("apple"));
        assert!(trie.contains("mango"));
    }

    #[test]
    fn all_permutations_accept_the_same_language() {
        const WORDS: [&str; 6] = ["a", "ab", "abc", "b", "ba", "cab"];
        const PROBES: [&str; 10] = [
            "a", "ab", "abc", "b", "ba", "cab", "", "c", "abcd", "bab",
        ];

        let reference: Vec<bool> = {
            let trie = build_trie(WORDS).unwrap();
            PROBES.iter().map(|p| trie.contains(p)).collect()
        };

        for wordlist in WORDS.iter().permutations(WORDS.len()) {
            let trie = build_trie(wordlist.into_iter().copied()).unwrap();
            let accepted: Vec<bool> = PROBES.iter().map(|p| trie.contains(p)).collect();
            assert_eq!(accepted, reference);
        }
    }

    #[test]
    fn duplicate_patterns_build_and_match() {
        let trie = build_trie(["ab", "ab"]).unwrap();
        assert!(trie.contains("ab"));
        assert!(!trie.contains("a"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn single_empty_pattern_builds_and_matches() {
        let trie = build_trie([""]).unwrap();
        assert!(trie.contains(""));
        assert!(!trie.contains("a"));
    }

    #[test]
    fn single_character_pattern() {
        let trie = build_trie(["x"]).unwrap();
        assert!(trie.contains("x"));
        assert!(!trie.contains(""));
        assert!(!trie.contains("xx"));
        assert!(!trie.contains("y"));
    }

    #[test]
    fn arrays_grow_past_the_initial_capacity() {
        // Two-character patterns over a wide scalar spread force many
        // sibling groups and repeated grows.
        let patterns: Vec<String> = (0..200)
            .map(|i| {
                let a = char::from_u32('a' as u32 + (i % 26)).unwrap();
                let b = char::from_u32('a' as u32 + (i / 26)).unwrap();
                format!("{a}{b}")
            })
            .collect();
        let trie = build_trie(&patterns).unwrap();
        assert!(trie.packed().len() > RESIZE_DELTA);
        for pattern in &patterns {
            assert!(trie.contains(pattern), "missing {pattern}");
        }
    }

    #[test]
    fn no_two_states_claim_the_same_slot() {
        let trie = build_trie(["car", "cart", "cat", "do", "dog", "dot"]).unwrap();
        let packed = trie.packed();

        // Every occupied slot records exactly one owner, and that owner's
        // base offset actually reaches the slot: check[p] <= p because a
        // transition slot is its owner's base plus a non-negative code.
        for p in 1..packed.len() {
            let owner = packed.check()[p];
            if owner != 0 {
                assert!(owner > 0);
                assert!(owner as usize <= p);
            }
        }
    }

    #[test]
    fn virtual_trie_is_fully_populated() {
        let trie = build_trie(["ab", "ac"]).unwrap();
        let root = trie.virtual_trie().root();
        assert_eq!(root.range(), (0, 2));

        // Every non-root node was placed and assigned a slot and base.
        fn assert_placed<C: crate::trie::scalar::TrieScalar>(
            node: &crate::trie::virtual_trie::VirtualTrieNode<C>,
        ) {
            assert!(node.slot().is_some());
            assert!(node.base().is_some());
            for child in node.children() {
                assert_placed(child);
            }
        }
        for child in root.children() {
            assert_placed(child);
        }
        // 'a', 'b', 'c', and one end-of-pattern node per pattern.
        assert_eq!(trie.virtual_trie().node_count(), 5);
    }

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
    }

    #[test]
    fn comment_with_whitespace_before_pound() {
        assert!(is_comment("        # indented comment"));
    }

    #[test]
    fn non_comment() {
        assert!(!is_comment("REVERBERATE"));
        assert!(!is_comment(" REVERBERATE"));
    }
}
