//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::types::errors::{MatcherError, MatcherResult};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Tuning knobs for a `TeamMatcher`, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum similarity for a fuzzy candidate to be accepted (inclusive).
    pub similarity_threshold: f64,
    /// When false, only raw and normalized exact matches resolve.
    pub enable_fuzzy_matching: bool,
    /// Reject queries made only of stop words / very short tokens unless the
    /// score is at least 0.9.
    pub strict_mode: bool,
    /// Candidates scoring within this distance of the best score compete on
    /// ID instead; the lowest ID wins. `0.0` disables the preference.
    pub lower_id_preference_threshold: f64,
    /// Number of names resolved per chunk in `resolve_batch`.
    pub batch_size: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            enable_fuzzy_matching: true,
            strict_mode: false,
            lower_id_preference_threshold: 0.05,
            batch_size: 50,
        }
    }
}

impl MatcherConfig {
    /// Reject values that would silently produce nonsensical matches.
    pub fn validate(&self) -> MatcherResult<()> {
        check_unit_interval("similarity_threshold", self.similarity_threshold)?;
        check_unit_interval(
            "lower_id_preference_threshold",
            self.lower_id_preference_threshold,
        )?;
        if self.batch_size == 0 {
            return Err(MatcherError::InvalidConfig {
                field: "batch_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Minimum score for a candidate to be listed as an alternative.
    pub fn alternative_floor(&self) -> f64 {
        (self.similarity_threshold - 0.4).max(0.3)
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> MatcherResult<()> {
    if !value.is_finite() {
        return Err(MatcherError::InvalidConfig {
            field,
            reason: format!("must be a finite number, got {value}"),
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(MatcherError::InvalidConfig {
            field,
            reason: format!("must be within [0, 1], got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/models/config_tests.rs"]
mod tests;
