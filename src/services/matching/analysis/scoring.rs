//! Hybrid similarity between two team names.
//!
//! Containment first, then weighted word overlap, with a Levenshtein blend
//! once word overlap already indicates a plausible pairing.

use crate::services::matching::core::normalizer::{normalize, word_tokens};
use crate::services::matching::core::vocabulary::is_stop_word;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 1.0;

/// Both names must be longer than this for the containment shortcut.
const CONTAINMENT_MIN_LEN: usize = 3;
const CONTAINMENT_BASE: f64 = 0.8;
const CONTAINMENT_SPAN: f64 = 0.15;
const CONTAINMENT_CAP: f64 = 0.95;

const STOP_WORD_WEIGHT: f64 = 0.2;
const PARTIAL_WEIGHT: f64 = 0.7;
/// Tokens must be longer than this to count as prefix (partial) matches.
const PARTIAL_MIN_LEN: usize = 3;

const LEVENSHTEIN_GATE: f64 = 0.6;
const LEVENSHTEIN_MAX_LEN: usize = 50;
const WORD_BLEND: f64 = 0.8;
const LEVENSHTEIN_BLEND: f64 = 0.2;

/// Similarity between two raw names in [0, 1].
///
/// Empty input on either side scores 0. Identical normalized forms score
/// exactly 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return SCORE_MIN;
    }
    similarity_normalized(&normalize(a), &normalize(b))
}

/// Same as `similarity` for inputs that are already normalized.
pub fn similarity_normalized(norm_a: &str, norm_b: &str) -> f64 {
    if norm_a == norm_b {
        return SCORE_MAX;
    }

    if let Some(score) = containment_score(norm_a, norm_b) {
        return score;
    }

    let Some(word_score) = word_overlap_score(norm_a, norm_b) else {
        return SCORE_MIN;
    };

    let blended = if word_score >= LEVENSHTEIN_GATE {
        let max_len = norm_a.chars().count().max(norm_b.chars().count());
        if max_len <= LEVENSHTEIN_MAX_LEN {
            let lev = strsim::normalized_levenshtein(norm_a, norm_b);
            (word_score * WORD_BLEND + lev * LEVENSHTEIN_BLEND).min(SCORE_MAX)
        } else {
            word_score
        }
    } else {
        word_score
    };

    blended.clamp(SCORE_MIN, SCORE_MAX)
}

/// `min(0.95, 0.8 + shorter/longer * 0.15)` when one name contains the other.
fn containment_score(norm_a: &str, norm_b: &str) -> Option<f64> {
    let len_a = norm_a.chars().count();
    let len_b = norm_b.chars().count();
    if len_a <= CONTAINMENT_MIN_LEN || len_b <= CONTAINMENT_MIN_LEN {
        return None;
    }

    let (shorter, longer) = if norm_a.contains(norm_b) {
        (len_b, len_a)
    } else if norm_b.contains(norm_a) {
        (len_a, len_b)
    } else {
        return None;
    };

    let ratio = shorter as f64 / longer as f64;
    Some((CONTAINMENT_BASE + ratio * CONTAINMENT_SPAN).min(CONTAINMENT_CAP))
}

/// Weighted share of A's tokens found in B; `None` when either side has no
/// tokens.
///
/// Stop words weigh 0.2 instead of 1.0. An exact token match earns its full
/// weight; otherwise a prefix relationship between two tokens longer than
/// three characters earns 0.7 of it.
pub fn word_overlap_score(norm_a: &str, norm_b: &str) -> Option<f64> {
    let words_a = word_tokens(norm_a);
    let words_b = word_tokens(norm_b);
    if words_a.is_empty() || words_b.is_empty() {
        return None;
    }

    let mut matched = 0.0;
    let mut total = 0.0;

    for word_a in &words_a {
        let weight = if is_stop_word(word_a) {
            STOP_WORD_WEIGHT
        } else {
            1.0
        };
        total += weight;

        if words_b.contains(word_a) {
            matched += weight;
        } else if words_b.iter().any(|word_b| is_partial_match(word_a, word_b)) {
            matched += weight * PARTIAL_WEIGHT;
        }
    }

    Some(matched / total)
}

fn is_partial_match(a: &str, b: &str) -> bool {
    a.chars().count() > PARTIAL_MIN_LEN
        && b.chars().count() > PARTIAL_MIN_LEN
        && (a.starts_with(b) || b.starts_with(a))
}

#[cfg(test)]
#[path = "../tests/analysis/scoring_tests.rs"]
mod tests;
