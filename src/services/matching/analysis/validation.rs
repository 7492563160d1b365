//! Acceptance gate for scored candidates.
//!
//! Similarity alone produces false positives between differently named
//! clubs that share generic tokens; these checks reject them.

#[cfg(feature = "debug_matcher")]
use log::debug;

use crate::services::matching::core::normalizer::{normalize, word_tokens};
use crate::services::matching::core::vocabulary::{
    default_disambiguation_rules, is_stop_word, DisambiguationRule,
};
use crate::services::matching::models::config::MatcherConfig;

/// Scores at or above this are accepted without further checks.
const AUTO_ACCEPT_SCORE: f64 = 0.95;
/// Multi-word queries sharing no significant token need at least this.
const NO_SIGNIFICANT_OVERLAP_MIN: f64 = 0.85;
/// Tokens longer than this (and not stop words) are significant.
const SIGNIFICANT_MIN_LEN: usize = 3;
const LENGTH_RATIO_MIN: f64 = 0.3;
const LENGTH_RATIO_OVERRIDE: f64 = 0.85;
const STRICT_MODE_MIN: f64 = 0.9;

/// A name in both raw and normalized form.
#[derive(Debug, Clone, Copy)]
pub struct NamePair<'a> {
    pub raw: &'a str,
    pub normalized: &'a str,
}

impl<'a> NamePair<'a> {
    pub fn new(raw: &'a str, normalized: &'a str) -> Self {
        Self { raw, normalized }
    }
}

/// Heuristic validator built from the engine configuration.
#[derive(Debug, Clone)]
pub struct MatchValidator {
    pub similarity_threshold: f64,
    pub strict_mode: bool,
    pub rules: Vec<DisambiguationRule>,
}

impl MatchValidator {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            strict_mode: config.strict_mode,
            rules: default_disambiguation_rules(),
        }
    }

    /// Replace the built-in disambiguation rules.
    pub fn with_rules(mut self, rules: Vec<DisambiguationRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Whether `candidate_name` is a believable match for `query` at `score`.
    pub fn is_acceptable(&self, query: &str, candidate_name: &str, score: f64) -> bool {
        let query_norm = normalize(query);
        let candidate_norm = normalize(candidate_name);
        self.is_acceptable_pair(
            NamePair::new(query, &query_norm),
            NamePair::new(candidate_name, &candidate_norm),
            score,
        )
    }

    /// Same as `is_acceptable` with both names already normalized.
    pub fn is_acceptable_pair(
        &self,
        query: NamePair<'_>,
        candidate: NamePair<'_>,
        score: f64,
    ) -> bool {
        match self.rejection(query, candidate, score) {
            None => true,
            Some(_reason) => {
                #[cfg(feature = "debug_matcher")]
                debug!(
                    "[MATCHER_CALIBRATION] rejected: {} | query={:?} candidate={:?} score={:.3}",
                    _reason, query.raw, candidate.raw, score
                );
                false
            }
        }
    }

    /// First failing check, if any.
    fn rejection(
        &self,
        query: NamePair<'_>,
        candidate: NamePair<'_>,
        score: f64,
    ) -> Option<&'static str> {
        if score == 1.0 {
            return None;
        }
        if score < self.similarity_threshold {
            return Some("below_threshold");
        }
        if score >= AUTO_ACCEPT_SCORE {
            return None;
        }

        let query_words = word_tokens(query.normalized);
        let candidate_words = word_tokens(candidate.normalized);

        if query_words.len() >= 2 {
            let shares_significant = query_words
                .iter()
                .any(|word| is_significant(word) && candidate_words.contains(word));

            if !shares_significant && score < NO_SIGNIFICANT_OVERLAP_MIN {
                return Some("no_significant_overlap");
            }
        }

        if self
            .rules
            .iter()
            .any(|rule| rule.rejects(&query_words, &candidate_words, score))
        {
            return Some("disambiguation_rule");
        }

        let query_len = query.raw.chars().count();
        let candidate_len = candidate.raw.chars().count();
        let longer = query_len.max(candidate_len);
        if longer > 0 {
            let ratio = query_len.min(candidate_len) as f64 / longer as f64;
            if ratio < LENGTH_RATIO_MIN && score < LENGTH_RATIO_OVERRIDE {
                return Some("length_ratio");
            }
        }

        if self.strict_mode {
            let only_generic = query_words
                .iter()
                .all(|word| is_stop_word(word) || word.chars().count() <= 2);
            if only_generic && score < STRICT_MODE_MIN {
                return Some("strict_generic_query");
            }
        }

        None
    }
}

fn is_significant(word: &str) -> bool {
    !is_stop_word(word) && word.chars().count() > SIGNIFICANT_MIN_LEN
}

#[cfg(test)]
#[path = "../tests/analysis/validation_tests.rs"]
mod tests;
