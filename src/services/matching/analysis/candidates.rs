//! Candidate selection over the prebuilt indexes.
//!
//! Stages run cheapest first. An exact normalized hit stops selection, and
//! each fuzzy stage only runs when every earlier one came back empty. No
//! stage ever scans the full reference table.

use std::collections::BTreeMap;

#[cfg(feature = "debug_matcher")]
use log::debug;

use crate::services::matching::analysis::indexes::{trigrams, TeamIndexes, MAX_AFFIX_LEN};
use crate::services::matching::core::normalizer::{char_prefix, char_suffix, significant_tokens};
use crate::services::matching::models::types::{Candidate, CandidatePriority, MAX_CANDIDATES};
use crate::services::matching::state::reference_table::ReferenceTable;

/// Queries must be longer than this (spaces removed) to reach the trigram stage.
const TRIGRAM_MIN_QUERY_LEN: usize = 6;
/// Minimum shared trigrams regardless of query length.
const TRIGRAM_MIN_SHARED: usize = 2;

/// Collect at most [`MAX_CANDIDATES`] entries worth scoring for `query_norm`.
///
/// `query_norm` must already be normalized. With `fuzzy_enabled` off only
/// exact normalized hits are returned.
pub fn select_candidates(
    query_norm: &str,
    table: &ReferenceTable,
    indexes: &TeamIndexes,
    fuzzy_enabled: bool,
) -> Vec<Candidate> {
    if query_norm.is_empty() {
        return Vec::new();
    }

    // ── Stage 1: exact normalized ──
    if let Some(postings) = indexes.by_normalized.get(query_norm) {
        let mut exact: Vec<Candidate> = postings
            .iter()
            .filter_map(|&entry| new_candidate(table, entry, CandidatePriority::Exact))
            .collect();
        exact.sort_by(|a, b| a.id.cmp(&b.id));
        exact.truncate(MAX_CANDIDATES);
        return exact;
    }

    if !fuzzy_enabled {
        return Vec::new();
    }

    let mut tokens = significant_tokens(query_norm);
    tokens.sort_unstable();
    tokens.dedup();
    let mut found: BTreeMap<usize, Candidate> = BTreeMap::new();

    // ── Stage 2: shared words ──
    for token in &tokens {
        let Some(postings) = indexes.by_word.get(*token) else {
            continue;
        };
        for posting in postings {
            if let Some(candidate) = found.get_mut(&posting.entry) {
                candidate.word_match_count += 1;
            } else if let Some(mut candidate) =
                new_candidate(table, posting.entry, CandidatePriority::Word)
            {
                candidate.word_match_count = 1;
                found.insert(posting.entry, candidate);
            }
        }
    }

    // ── Stage 3: word prefixes and suffixes ──
    if found.is_empty() {
        collect_affix_candidates(&tokens, table, indexes, &mut found);
    }

    // ── Stage 4: character trigrams ──
    if found.is_empty() {
        let compact_len = query_norm.chars().filter(|c| !c.is_whitespace()).count();
        if compact_len > TRIGRAM_MIN_QUERY_LEN {
            collect_trigram_candidates(query_norm, table, indexes, &mut found);
        }
    }

    let mut candidates: Vec<Candidate> = found.into_values().collect();
    sort_candidates(&mut candidates);
    candidates.truncate(MAX_CANDIDATES);

    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER_CALIBRATION] candidates: query={:?} count={} fuzzy={}",
        query_norm,
        candidates.len(),
        fuzzy_enabled
    );

    candidates
}

/// Word-match count desc → priority asc → gram overlap desc → id asc.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.word_match_count
            .cmp(&a.word_match_count)
            .then_with(|| a.priority.cmp(&b.priority))
            .then_with(|| b.gram_overlap.cmp(&a.gram_overlap))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn collect_affix_candidates(
    tokens: &[&str],
    table: &ReferenceTable,
    indexes: &TeamIndexes,
    found: &mut BTreeMap<usize, Candidate>,
) {
    for token in tokens {
        let len = token.chars().count().min(MAX_AFFIX_LEN);
        let lookups = [
            indexes.by_prefix.get(char_prefix(token, len)),
            indexes.by_suffix.get(char_suffix(token, len)),
        ];
        for postings in lookups.into_iter().flatten() {
            for posting in postings {
                if let Some(candidate) = found.get_mut(&posting.entry) {
                    candidate.gram_overlap += 1;
                } else if let Some(mut candidate) =
                    new_candidate(table, posting.entry, CandidatePriority::Affix)
                {
                    candidate.gram_overlap = 1;
                    found.insert(posting.entry, candidate);
                }
            }
        }
    }
}

fn collect_trigram_candidates(
    query_norm: &str,
    table: &ReferenceTable,
    indexes: &TeamIndexes,
    found: &mut BTreeMap<usize, Candidate>,
) {
    let grams = trigrams(query_norm);
    let required = grams.len().div_ceil(2).max(TRIGRAM_MIN_SHARED);

    let mut shared: BTreeMap<usize, usize> = BTreeMap::new();
    for gram in &grams {
        if let Some(postings) = indexes.by_trigram.get(gram) {
            for &entry in postings {
                *shared.entry(entry).or_insert(0) += 1;
            }
        }
    }

    for (entry, count) in shared {
        if count < required || found.contains_key(&entry) {
            continue;
        }
        if let Some(mut candidate) = new_candidate(table, entry, CandidatePriority::Trigram) {
            candidate.gram_overlap = u32::try_from(count).unwrap_or(u32::MAX);
            found.insert(entry, candidate);
        }
    }
}

fn new_candidate(
    table: &ReferenceTable,
    entry: usize,
    priority: CandidatePriority,
) -> Option<Candidate> {
    table.get(entry).map(|reference| Candidate {
        entry,
        id: reference.id.clone(),
        priority,
        word_match_count: 0,
        gram_overlap: 0,
    })
}

#[cfg(test)]
#[path = "../tests/analysis/candidates_tests.rs"]
mod tests;
