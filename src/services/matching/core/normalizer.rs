//! Text normalization for team names.
//! Produces the comparable form shared by indexing, scoring and validation.

use regex::Regex;
use std::sync::LazyLock;

use super::vocabulary::{is_club_affix, is_stop_word, lookup_abbreviation};

/// Leading club-type token, including the punctuated `f.c.` family.
static RE_LEADING_AFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:fc|cf|ac|sc|as|ca|cs|rc|rs|cd|ud|rcd|rsd|rfc|afc|cfc|sfc|f\.c\.?|a\.c\.?|s\.c\.?)\s+",
    )
    .expect("Invalid regex")
});

/// Trailing club-type token, including the punctuated `f.c.` family.
static RE_TRAILING_AFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s+(?:fc|cf|ac|sc|as|ca|cs|rc|rs|cd|ud|rcd|rsd|rfc|afc|cfc|sfc|f\.c\.?|a\.c\.?|s\.c\.?)$",
    )
    .expect("Invalid regex")
});

/// Anything that is not a letter, combining mark, digit or whitespace.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{M}\p{N}\s]").expect("Invalid regex"));

/// Normalize a raw team name into its comparable form.
///
/// Pipeline:
/// 1. Lowercase and trim
/// 2. Strip one leading and one trailing club-type affix (punctuated forms included)
/// 3. Replace non-alphanumeric characters with spaces, collapse whitespace
/// 4. Strip remaining affix tokens from both ends until stable
/// 5. Substitute a curated abbreviation if the whole name matches one
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let trimmed = lower.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let without_prefix = RE_LEADING_AFFIX.replace(trimmed, "");
    let without_suffix = RE_TRAILING_AFFIX.replace(&without_prefix, "");
    let clean = RE_NON_ALNUM.replace_all(&without_suffix, " ");

    let mut tokens: Vec<&str> = clean.split_whitespace().collect();
    strip_affix_tokens(&mut tokens);
    let collapsed = tokens.join(" ");

    match lookup_abbreviation(&collapsed) {
        Some(full) => full.to_string(),
        None => collapsed,
    }
}

/// Drop club-type tokens from both ends, never emptying the name.
fn strip_affix_tokens(tokens: &mut Vec<&str>) {
    while tokens.len() > 1 && is_club_affix(tokens[0]) {
        tokens.remove(0);
    }
    while tokens.len() > 1 && tokens.last().is_some_and(|t| is_club_affix(t)) {
        tokens.pop();
    }
}

/// Split a normalized name into tokens longer than one character.
///
/// Used by the scorer and validator.
pub fn word_tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .collect()
}

/// Split a normalized name into index-worthy tokens: longer than two
/// characters and not a stop word.
pub fn significant_tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !is_stop_word(w))
        .collect()
}

/// First `n` characters of `word` (char-aware).
pub(crate) fn char_prefix(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

/// Last `n` characters of `word` (char-aware).
pub(crate) fn char_suffix(word: &str, n: usize) -> &str {
    let len = word.chars().count();
    if n >= len {
        return word;
    }
    match word.char_indices().nth(len - n) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

#[cfg(test)]
#[path = "../tests/core/normalizer_tests.rs"]
mod tests;
