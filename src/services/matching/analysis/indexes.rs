//! Deterministic lookup tables over the reference table, built once.

use std::collections::{BTreeMap, HashMap};

use crate::services::matching::core::normalizer::{self, char_prefix, char_suffix};
use crate::services::matching::state::reference_table::ReferenceTable;

/// Entry positions, in table order, without duplicates.
pub type PostingList = Vec<usize>;

/// Word-level posting: the entry and the indexed word it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPosting {
    pub entry: usize,
    pub word: String,
}

/// Shortest and longest affix lengths recorded in the prefix/suffix tables.
pub const MIN_AFFIX_LEN: usize = 3;
pub const MAX_AFFIX_LEN: usize = 6;

/// Normalized names must be longer than this to enter the trigram table.
pub const TRIGRAM_MIN_NAME_LEN: usize = 6;

/// Precomputed lookup structures used by candidate selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamIndexes {
    /// Raw canonical name → entry. Last write wins on duplicate names.
    pub exact_by_name: HashMap<String, usize>,
    pub by_normalized: BTreeMap<String, PostingList>,
    pub by_word: BTreeMap<String, Vec<WordPosting>>,
    pub by_prefix: BTreeMap<String, Vec<WordPosting>>,
    pub by_suffix: BTreeMap<String, Vec<WordPosting>>,
    pub by_trigram: BTreeMap<String, PostingList>,
    /// Normalized form of each entry, by table position.
    pub normalized_names: Vec<String>,
}

impl TeamIndexes {
    /// Build every index in a single pass over the table.
    pub fn build(table: &ReferenceTable) -> Self {
        let mut indexes = Self::default();

        for (entry_id, entry) in table.entries().iter().enumerate() {
            let normalized = normalizer::normalize(&entry.canonical_name);

            indexes
                .exact_by_name
                .insert(entry.canonical_name.clone(), entry_id);
            indexes
                .by_normalized
                .entry(normalized.clone())
                .or_default()
                .push(entry_id);

            for word in normalizer::significant_tokens(&normalized) {
                push_word(&mut indexes.by_word, word, entry_id, word);

                let max_len = word.chars().count().min(MAX_AFFIX_LEN);
                for len in MIN_AFFIX_LEN..=max_len {
                    push_word(&mut indexes.by_prefix, char_prefix(word, len), entry_id, word);
                    push_word(&mut indexes.by_suffix, char_suffix(word, len), entry_id, word);
                }
            }

            if normalized.chars().count() > TRIGRAM_MIN_NAME_LEN {
                for gram in trigrams(&normalized) {
                    indexes.by_trigram.entry(gram).or_default().push(entry_id);
                }
            }

            indexes.normalized_names.push(normalized);
        }

        finalize_word_postings(&mut indexes.by_word);
        finalize_word_postings(&mut indexes.by_prefix);
        finalize_word_postings(&mut indexes.by_suffix);
        finalize_postings(&mut indexes.by_trigram);

        indexes
    }

    pub fn normalized_name(&self, entry: usize) -> &str {
        self.normalized_names
            .get(entry)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Distinct 3-character windows over `normalized` with whitespace removed,
/// in first-seen order.
pub fn trigrams(normalized: &str) -> Vec<String> {
    let compact: Vec<char> = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    let mut grams: Vec<String> = Vec::new();
    for window in compact.windows(3) {
        let gram: String = window.iter().collect();
        if !grams.contains(&gram) {
            grams.push(gram);
        }
    }
    grams
}

fn push_word(
    index: &mut BTreeMap<String, Vec<WordPosting>>,
    key: &str,
    entry: usize,
    word: &str,
) {
    index.entry(key.to_string()).or_default().push(WordPosting {
        entry,
        word: word.to_string(),
    });
}

// Entries are pushed in table order, so only adjacent duplicates exist.
fn finalize_word_postings(index: &mut BTreeMap<String, Vec<WordPosting>>) {
    for posting in index.values_mut() {
        posting.dedup();
    }
}

fn finalize_postings(index: &mut BTreeMap<String, PostingList>) {
    for posting in index.values_mut() {
        posting.dedup();
    }
}

#[cfg(test)]
#[path = "../tests/analysis/indexes_tests.rs"]
mod tests;
