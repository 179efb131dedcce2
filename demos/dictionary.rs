//! Example: building a Dictionary wrapper around the double-array trie.
//!
//! This shows how to create a convenient high-level API on top of the raw
//! trie interface. The `Dictionary` struct wraps a built `DoubleArrayTrie`
//! and provides word lookup, suffix resumption from a sub-state, and
//! recovery of the stored words from the output table.
//!
//! Run with: cargo run --example dictionary

use libdatrie::{build_trie, DoubleArrayTrie, ROOT_INDEX};

/// A convenient wrapper around a built trie for word validation.
struct Dictionary {
    trie: DoubleArrayTrie<char>,
}

impl Dictionary {
    fn new(words: &[&str]) -> Self {
        Dictionary {
            trie: build_trie(words.iter().copied()).expect("word list is non-empty"),
        }
    }

    /// Returns true if the word is in the dictionary.
    fn is_word(&self, word: &str) -> bool {
        self.trie.contains(word)
    }

    /// Returns the packed-array state reached after `prefix`, if any word
    /// starts with it. The returned index can be passed to `exact_match`
    /// to resume a scan without re-walking the prefix.
    fn state_after(&self, prefix: &str) -> Option<usize> {
        let packed = self.trie.packed();
        prefix
            .chars()
            .try_fold(ROOT_INDEX, |state, ch| packed.step(state, ch))
    }

    /// Returns all words in the dictionary, recovered from the output table.
    fn all_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .trie
            .output()
            .iter()
            .map(|(_, key)| key.iter().collect())
            .collect();
        words.sort();
        words
    }
}

fn main() {
    let words = ["bake", "baked", "baker", "cake", "caked", "fake", "lake"];
    let dictionary = Dictionary::new(&words);

    // Word lookup
    println!("Word lookup:");
    for word in ["bake", "baker", "bakes", "cake", "lake", "make"] {
        let found = if dictionary.is_word(word) { "yes" } else { "no" };
        println!("  {word}: {found}");
    }

    // Resuming from a sub-state
    println!("\nSuffix matching after \"bak\":");
    if let Some(state) = dictionary.state_after("bak") {
        let packed = dictionary.trie.packed();
        for suffix in ["e", "ed", "er", "ing"] {
            let found = if packed.exact_match(suffix, state) { "yes" } else { "no" };
            println!("  bak+{suffix}: {found}");
        }
    }

    // List all words
    println!("\nAll words: {:?}", dictionary.all_words());

    // The packed arrays are plain integers, ready for persistence.
    let packed = dictionary.trie.packed();
    println!(
        "\nPacked into {} slots for {} words",
        packed.len(),
        dictionary.trie.len()
    );
}
