use super::*;
use crate::services::matching::core::normalizer::normalize;

fn select(table: &ReferenceTable, query: &str, fuzzy: bool) -> Vec<Candidate> {
    let indexes = TeamIndexes::build(table);
    select_candidates(&normalize(query), table, &indexes, fuzzy)
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn test_exact_normalized_hits_short_circuit_sorted_by_id() {
    let table = ReferenceTable::from_pairs([
        ("12", "Nantes"),
        ("7", "Nantes Atlantique"),
        ("3", "FC Nantes"),
    ]);
    let candidates = select(&table, "Nantes", true);

    assert_eq!(ids(&candidates), vec!["3", "12"]);
    assert!(candidates
        .iter()
        .all(|c| c.priority == CandidatePriority::Exact));
}

#[test]
fn test_exact_hits_returned_even_without_fuzzy() {
    let table = ReferenceTable::from_pairs([("2", "Nantes")]);
    assert_eq!(ids(&select(&table, "FC Nantes", false)), vec!["2"]);
}

#[test]
fn test_fuzzy_disabled_returns_nothing_for_inexact_query() {
    let table = ReferenceTable::from_pairs([("1", "Valencia C.F")]);
    assert!(select(&table, "Valencia", false).is_empty());
}

#[test]
fn test_empty_query_returns_nothing() {
    let table = ReferenceTable::from_pairs([("1", "Valencia C.F")]);
    let indexes = TeamIndexes::build(&table);
    assert!(select_candidates("", &table, &indexes, true).is_empty());
}

#[test]
fn test_shared_word_candidates_ranked_by_match_count() {
    let table = ReferenceTable::from_pairs([
        ("1", "Manchester City"),
        ("2", "Leeds United"),
        ("3", "Leeds Manchester Athletic"),
    ]);
    let candidates = select(&table, "Leeds Manchester", true);

    assert_eq!(ids(&candidates), vec!["3", "1", "2"]);
    assert_eq!(candidates[0].word_match_count, 2);
    assert_eq!(candidates[1].word_match_count, 1);
    assert!(candidates
        .iter()
        .all(|c| c.priority == CandidatePriority::Word));
}

#[test]
fn test_affix_stage_reaches_inflected_names() {
    let table = ReferenceTable::from_pairs([("1", "Valencia C.F"), ("2", "Nantes")]);
    let candidates = select(&table, "Valenciana", true);

    assert_eq!(ids(&candidates), vec!["1"]);
    assert_eq!(candidates[0].priority, CandidatePriority::Affix);
    assert_eq!(candidates[0].gram_overlap, 1);
}

#[test]
fn test_affix_candidates_ranked_by_hits() {
    let table = ReferenceTable::from_pairs([
        ("1", "Kingstown"),
        ("2", "Kingsteam Livingston"),
    ]);
    let candidates = select(&table, "Kingston", true);

    // "kingst" hits both, "ngston" only the second.
    assert_eq!(ids(&candidates), vec!["2", "1"]);
    assert_eq!(candidates[0].gram_overlap, 2);
    assert_eq!(candidates[1].gram_overlap, 1);
}

#[test]
fn test_word_hits_suppress_affix_stage() {
    let table = ReferenceTable::from_pairs([
        ("1", "Valenciana"),
        ("2", "Valencia C.F"),
    ]);
    let candidates = select(&table, "Valencia", true);

    // "valenc" would reach "Valenciana" by prefix, but the word stage already hit.
    assert_eq!(ids(&candidates), vec!["2"]);
    assert!(candidates
        .iter()
        .all(|c| c.priority == CandidatePriority::Word));
}

#[test]
fn test_trigram_stage_recovers_misspellings() {
    let table = ReferenceTable::from_pairs([
        ("1", "Borussia Dortmund"),
        ("2", "Bayern Munich"),
    ]);
    let candidates = select(&table, "Borusxia Dortmxnd", true);

    assert_eq!(ids(&candidates), vec!["1"]);
    assert_eq!(candidates[0].priority, CandidatePriority::Trigram);
    assert_eq!(candidates[0].gram_overlap, 8);
}

#[test]
fn test_trigram_stage_skipped_for_short_queries() {
    let table = ReferenceTable::from_pairs([("1", "Borussia Dortmund")]);
    assert!(select(&table, "Borxss", true).is_empty());
}

#[test]
fn test_candidate_count_is_capped() {
    let pairs: Vec<(String, String)> = (1..=60)
        .map(|n| (n.to_string(), format!("Rovers {n}")))
        .collect();
    let table = ReferenceTable::from_pairs(pairs);
    let candidates = select(&table, "Rovers", true);

    assert_eq!(candidates.len(), MAX_CANDIDATES);
    assert_eq!(candidates[0].id, "1");
    assert_eq!(candidates[MAX_CANDIDATES - 1].id, "50");
}

#[test]
fn test_selection_is_deterministic() {
    let table = ReferenceTable::from_pairs([
        ("4", "Manchester City"),
        ("3", "Manchester United"),
        ("9", "Manchester Rovers"),
    ]);
    let first = select(&table, "Manchester", true);
    let second = select(&table, "Manchester", true);

    assert_eq!(first, second);
    assert_eq!(ids(&first), vec!["3", "4", "9"]);
}
