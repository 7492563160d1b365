use super::*;
use crate::services::matching::models::types::{sort_scored_deterministic, TeamId};

fn scored(id: &str, score: f64) -> ScoredCandidate {
    ScoredCandidate {
        entry: 0,
        id: TeamId::from(id),
        name: format!("Team {id}"),
        score,
        is_valid: true,
    }
}

fn winner(mut candidates: Vec<ScoredCandidate>, window: f64) -> Option<String> {
    sort_scored_deterministic(&mut candidates);
    pick_preferred(&candidates, window).map(|c| c.id.to_string())
}

#[test]
fn test_empty_input_has_no_winner() {
    assert!(pick_preferred(&[], 0.05).is_none());
}

#[test]
fn test_equal_scores_prefer_lower_id() {
    let candidates = vec![scored("20", 0.82), scored("10", 0.82)];
    assert_eq!(winner(candidates, 0.05).as_deref(), Some("10"));
}

#[test]
fn test_near_equal_scores_prefer_lower_id() {
    let candidates = vec![scored("20", 0.90), scored("10", 0.86)];
    assert_eq!(winner(candidates, 0.05).as_deref(), Some("10"));
}

#[test]
fn test_gap_outside_window_keeps_best_score() {
    let candidates = vec![scored("20", 0.90), scored("10", 0.84)];
    assert_eq!(winner(candidates, 0.05).as_deref(), Some("20"));
}

#[test]
fn test_window_boundary_is_exclusive() {
    let candidates = vec![scored("20", 0.75), scored("10", 0.5)];
    assert_eq!(winner(candidates, 0.25).as_deref(), Some("20"));
}

#[test]
fn test_zero_window_disables_preference() {
    let candidates = vec![scored("20", 0.90), scored("10", 0.89)];
    assert_eq!(winner(candidates, 0.0).as_deref(), Some("20"));

    // Exact ties still resolve to the lower ID through the ranking itself.
    let candidates = vec![scored("20", 0.90), scored("10", 0.90)];
    assert_eq!(winner(candidates, 0.0).as_deref(), Some("10"));
}

#[test]
fn test_eligibility_measured_from_top_score_only() {
    // "5" is within the window of "30" but not of the top "40".
    let candidates = vec![scored("40", 0.95), scored("30", 0.91), scored("5", 0.87)];
    assert_eq!(winner(candidates, 0.05).as_deref(), Some("30"));
}

#[test]
fn test_numeric_ids_compare_by_value() {
    let candidates = vec![scored("100", 0.8), scored("9", 0.8)];
    assert_eq!(winner(candidates, 0.05).as_deref(), Some("9"));
}
