//! Fixed vocabulary tables for team-name matching.
//!
//! Everything here is plain data: the normalizer, index builder, scorer and
//! validator read these tables but never mutate them.

/// Generic tokens that carry little disambiguating value.
///
/// Excluded from the word indexes and down-weighted during scoring.
pub const STOP_WORDS: &[&str] = &[
    "town", "city", "united", "fc", "cf", "ac", "sc", "al", "real", "club", "de", "del",
    "da", "di", "le", "la", "los", "las", "el", "il", "sporting", "athletic", "atletico",
    "football", "soccer", "sport", "sports",
];

/// Club-type tokens stripped from either end of a name.
pub const CLUB_AFFIXES: &[&str] = &[
    "fc", "cf", "ac", "sc", "as", "ca", "cs", "rc", "rs", "cd", "ud", "rcd", "rsd", "rfc", "afc",
    "cfc", "sfc",
];

/// Curated short forms, keyed by their cleaned (post-punctuation) spelling.
///
/// Every target must already be a fixed point of `normalize`.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("psg", "paris saint germain"),
    ("man utd", "manchester united"),
    ("man united", "manchester united"),
    ("man city", "manchester city"),
    ("tottenham", "tottenham hotspur"),
    ("spurs", "tottenham hotspur"),
    ("brighton", "brighton hove albion"),
    ("west ham", "west ham united"),
    ("newcastle", "newcastle united"),
    ("sheffield utd", "sheffield united"),
    ("sheffield wed", "sheffield wednesday"),
    ("nottm forest", "nottingham forest"),
    ("notts forest", "nottingham forest"),
    ("wolves", "wolverhampton wanderers"),
    ("qpr", "queens park rangers"),
    ("barca", "barcelona"),
];

/// Declarative guard against a known name collision.
///
/// When every `query_tokens` entry is present in the query and none of
/// `candidate_tokens` is present in the candidate, the match is rejected
/// unless its score reaches `min_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisambiguationRule {
    pub query_tokens: Vec<String>,
    pub candidate_tokens: Vec<String>,
    pub min_score: f64,
}

impl DisambiguationRule {
    pub fn new(query_tokens: &[&str], candidate_tokens: &[&str], min_score: f64) -> Self {
        Self {
            query_tokens: query_tokens.iter().map(|t| t.to_string()).collect(),
            candidate_tokens: candidate_tokens.iter().map(|t| t.to_string()).collect(),
            min_score,
        }
    }

    /// Whether this rule fires for the given token sets.
    ///
    /// Returns `true` when the rule rejects the pairing at `score`.
    pub fn rejects(&self, query_tokens: &[&str], candidate_tokens: &[&str], score: f64) -> bool {
        let applies = self
            .query_tokens
            .iter()
            .all(|term| query_tokens.contains(&term.as_str()));
        if !applies {
            return false;
        }

        let candidate_ok = self
            .candidate_tokens
            .iter()
            .any(|term| candidate_tokens.contains(&term.as_str()));

        !candidate_ok && score < self.min_score
    }
}

/// Built-in disambiguation rules, evaluated in order.
pub fn default_disambiguation_rules() -> Vec<DisambiguationRule> {
    vec![
        DisambiguationRule::new(&["manchester", "united"], &["manchester"], 0.9),
        DisambiguationRule::new(&["manchester", "city"], &["manchester"], 0.9),
        DisambiguationRule::new(&["tottenham", "hotspur"], &["tottenham", "hotspur"], 0.85),
        DisambiguationRule::new(
            &["nottingham", "forest"],
            &["nottingham", "forest", "nottm"],
            0.85,
        ),
        DisambiguationRule::new(&["crystal", "palace"], &["crystal", "palace"], 0.9),
        DisambiguationRule::new(&["west", "ham"], &["west", "ham"], 0.9),
        DisambiguationRule::new(&["brighton", "hove"], &["brighton", "hove"], 0.85),
    ]
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

pub fn is_club_affix(token: &str) -> bool {
    CLUB_AFFIXES.contains(&token)
}

pub fn lookup_abbreviation(cleaned: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == cleaned)
        .map(|(_, full)| *full)
}

#[cfg(test)]
#[path = "../tests/core/vocabulary_tests.rs"]
mod tests;
