use super::*;
use crate::services::matching::models::config::MatcherConfig;
use crate::services::matching::state::reference_table::ReferenceTable;

fn fixture_with(config: MatcherConfig) -> TeamMatcher {
    let table = ReferenceTable::from_pairs([
        ("1", "Valencia C.F"),
        ("2", "Nantes"),
        ("3", "Manchester United"),
        ("4", "Manchester City"),
    ]);
    TeamMatcher::new(table, config).expect("valid config")
}

fn fixture() -> TeamMatcher {
    fixture_with(MatcherConfig::default())
}

#[test]
fn test_batch_dedups_and_drops_blank_names() {
    let matcher = fixture();
    let results = matcher.resolve_batch(&["Valencia", "Valencia C.F", "Valencia", "", "  "]);

    assert_eq!(results.len(), 2);
    assert_eq!(results["Valencia"], Some(TeamId::from("1")));
    assert_eq!(results["Valencia C.F"], Some(TeamId::from("1")));

    // Each distinct name was resolved once.
    let stats = matcher.cache_stats();
    assert_eq!(stats.size, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);

    matcher.resolve("Valencia");
    assert_eq!(matcher.cache_stats().hits, 1);
}

#[test]
fn test_batch_reports_progress_in_first_occurrence_order() {
    let matcher = fixture();
    let mut reports: Vec<(String, Option<String>, usize, usize, f64)> = Vec::new();

    matcher.resolve_batch_with_progress(
        &["Valencia", "Nowhere Town", "Valencia", "FC Nantes"],
        |progress| {
            reports.push((
                progress.name.to_string(),
                progress.id.map(|id| id.to_string()),
                progress.processed,
                progress.total,
                progress.progress,
            ));
        },
    );

    let names: Vec<&str> = reports.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(names, vec!["Valencia", "Nowhere Town", "FC Nantes"]);
    assert_eq!(reports[0].1.as_deref(), Some("1"));
    assert_eq!(reports[1].1, None);
    assert_eq!(reports[2].1.as_deref(), Some("2"));

    let processed: Vec<usize> = reports.iter().map(|r| r.2).collect();
    assert_eq!(processed, vec![1, 2, 3]);
    assert!(reports.iter().all(|r| r.3 == 3));
    assert_eq!(reports[2].4, 1.0);
}

#[test]
fn test_batch_chunking_does_not_change_results() {
    let names = ["Valencia", "FC Nantes", "Man United", "Manchester", "Nowhere Town"];
    let chunked = fixture_with(MatcherConfig {
        batch_size: 2,
        ..MatcherConfig::default()
    });

    let mut calls = 0usize;
    let results = chunked.resolve_batch_with_progress(&names, |_| calls += 1);

    assert_eq!(calls, names.len());
    assert_eq!(results, fixture().resolve_batch(&names));
}

#[test]
fn test_empty_batch() {
    let matcher = fixture();
    let names: [&str; 0] = [];
    let mut calls = 0usize;

    let results = matcher.resolve_batch_with_progress(&names, |_| calls += 1);
    assert!(results.is_empty());
    assert_eq!(calls, 0);
}

#[test]
fn test_batch_accepts_owned_strings() {
    let names: Vec<String> = vec!["Man City".to_string(), "Nantes".to_string()];
    let results = fixture().resolve_batch(&names);
    assert_eq!(results["Man City"], Some(TeamId::from("4")));
    assert_eq!(results["Nantes"], Some(TeamId::from("2")));
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let names: Vec<String> = [
        "Valencia",
        "FC Nantes",
        "Man United",
        "Manchester",
        "Nowhere Town",
        "Valencia",
        "",
    ]
    .iter()
    .cycle()
    .take(70)
    .map(|name| name.to_string())
    .collect();

    let parallel = fixture();
    let results = parallel.resolve_batch_parallel(&names);

    assert_eq!(results, fixture().resolve_batch(&names));
    assert_eq!(results.len(), 5);
    assert_eq!(parallel.cache_stats().size, 5);
}
