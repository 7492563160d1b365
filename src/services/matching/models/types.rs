//! Domain types for the team matcher.
//!
//! Contains: TeamId, ReferenceEntry, Candidate, ScoredCandidate, Alternative,
//! MatchResult, CacheStats, BatchProgress.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ==================== IDENTIFIERS ====================

/// Reference-table identifier with numeric-aware ordering.
///
/// IDs that parse as unsigned integers compare by value and sort before any
/// non-numeric ID; non-numeric IDs compare lexicographically. Equality and
/// hashing use the raw string, so `"007"` and `"7"` are distinct IDs.
#[derive(Debug, Clone)]
pub struct TeamId {
    raw: String,
    numeric: Option<u64>,
}

impl TeamId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let numeric = raw.parse::<u64>().ok();
        Self { raw, numeric }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn numeric(&self) -> Option<u64> {
        self.numeric
    }
}

impl PartialEq for TeamId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for TeamId {}

impl Hash for TeamId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for TeamId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.raw.cmp(&other.raw)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for TeamId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for TeamId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TeamId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl PartialEq<&str> for TeamId {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl Serialize for TeamId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(raw) => Self::new(raw),
            RawId::Number(value) => Self::new(value.to_string()),
        })
    }
}

// ==================== REFERENCE DATA ====================

/// A single row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: TeamId,
    #[serde(alias = "name")]
    pub canonical_name: String,
}

impl ReferenceEntry {
    pub fn new(id: impl Into<TeamId>, canonical_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            canonical_name: canonical_name.into(),
        }
    }
}

// ==================== CANDIDATES ====================

/// How a candidate entered the selection.
///
/// Lower values rank first when word-match counts tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CandidatePriority {
    /// Normalized forms are identical.
    Exact = 1,
    /// Shares at least one significant word.
    Word = 2,
    /// Shares a word prefix or suffix.
    Affix = 3,
    /// Shares enough character trigrams.
    Trigram = 4,
}

/// A reference entry provisionally considered for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the entry in the reference table.
    pub entry: usize,
    pub id: TeamId,
    pub priority: CandidatePriority,
    pub word_match_count: u32,
    /// Prefix/suffix hits or shared trigrams; ranks affix and trigram candidates.
    pub gram_overlap: u32,
}

/// Candidate after scoring and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub entry: usize,
    pub id: TeamId,
    pub name: String,
    pub score: f64,
    pub is_valid: bool,
}

/// Sort scored candidates deterministically: score desc → id asc.
pub fn sort_scored_deterministic(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ==================== RESULTS ====================

/// Ranked alternative reported by `resolve_with_detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: TeamId,
    pub name: String,
    pub score: f64,
    /// Whether this alternative passes validation on its own.
    pub is_valid: bool,
}

/// Diagnostic result for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: TeamId,
    pub matched_name: String,
    pub score: f64,
    pub alternatives: Vec<Alternative>,
}

/// Snapshot of the resolution cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Distinct raw queries cached (including cached misses).
    pub size: usize,
    /// Rows in the reference table.
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}

/// Per-item progress report emitted during batch resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress<'a> {
    pub name: &'a str,
    pub id: Option<&'a TeamId>,
    pub processed: usize,
    pub total: usize,
    /// `processed / total`, in [0, 1].
    pub progress: f64,
}

// ==================== CAPS & LIMITS ====================

/// Maximum number of candidates considered per query.
pub const MAX_CANDIDATES: usize = 50;

/// Maximum number of alternatives reported by `resolve_with_detail`.
pub const MAX_ALTERNATIVES: usize = 10;

#[cfg(test)]
#[path = "../tests/models/types_tests.rs"]
mod tests;
