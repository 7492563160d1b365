//! Lower-ID preference among near-equal winners.

use crate::services::matching::models::types::ScoredCandidate;

/// Pick the winner from candidates already ranked score desc → id asc.
///
/// Every candidate whose score is strictly within `window` of the top score
/// is eligible, and the eligible candidate with the lowest ID wins. A window
/// of `0.0` always yields the top-ranked candidate.
pub fn pick_preferred(ranked: &[ScoredCandidate], window: f64) -> Option<&ScoredCandidate> {
    let top = ranked.first()?;
    if window <= 0.0 {
        return Some(top);
    }

    ranked
        .iter()
        .take_while(|candidate| top.score - candidate.score < window)
        .min_by(|a, b| a.id.cmp(&b.id))
}

#[cfg(test)]
#[path = "../tests/pipeline/tie_break_tests.rs"]
mod tests;
