//! Single-name resolution: exact lookup, candidate scoring, validation and
//! tie-break, fronted by the engine's resolution cache.

use log::{debug, info, trace};

use crate::services::matching::analysis::candidates::select_candidates;
use crate::services::matching::analysis::indexes::TeamIndexes;
use crate::services::matching::analysis::scoring::similarity_normalized;
use crate::services::matching::analysis::validation::{MatchValidator, NamePair};
use crate::services::matching::core::normalizer::normalize;
use crate::services::matching::models::config::MatcherConfig;
use crate::services::matching::models::types::{
    sort_scored_deterministic, Alternative, CacheStats, MatchResult, ScoredCandidate, TeamId,
    MAX_ALTERNATIVES,
};
use crate::services::matching::pipeline::tie_break::pick_preferred;
use crate::services::matching::state::reference_table::ReferenceTable;
use crate::services::matching::state::resolution_cache::ResolutionCache;
use crate::types::errors::MatcherResult;

/// Score given to raw exact matches.
const EXACT_SCORE: f64 = 1.0;

/// The matching engine: an immutable reference table with its indexes, plus
/// a per-instance resolution cache.
///
/// `Send + Sync`; every method takes `&self`.
#[derive(Debug)]
pub struct TeamMatcher {
    config: MatcherConfig,
    table: ReferenceTable,
    indexes: TeamIndexes,
    validator: MatchValidator,
    cache: ResolutionCache,
}

impl TeamMatcher {
    /// Validate `config` and build every index over `table`.
    pub fn new(table: ReferenceTable, config: MatcherConfig) -> MatcherResult<Self> {
        config.validate()?;
        Ok(Self::build(table, config))
    }

    /// Build with [`MatcherConfig::default`], which is always valid.
    pub fn with_defaults(table: ReferenceTable) -> Self {
        Self::build(table, MatcherConfig::default())
    }

    fn build(table: ReferenceTable, config: MatcherConfig) -> Self {
        let indexes = TeamIndexes::build(&table);
        let validator = MatchValidator::new(&config);

        info!(
            "Team matcher ready: {} entries, {} normalized keys, {} words, {} trigrams",
            table.len(),
            indexes.by_normalized.len(),
            indexes.by_word.len(),
            indexes.by_trigram.len()
        );

        Self {
            config,
            table,
            indexes,
            validator,
            cache: ResolutionCache::new(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn indexes(&self) -> &TeamIndexes {
        &self.indexes
    }

    // ==================== RESOLUTION ====================

    /// Resolve a raw name to a reference ID.
    ///
    /// Blank input returns `None` without touching the cache. Every other
    /// outcome, including `None`, is cached under the raw string.
    pub fn resolve(&self, name: &str) -> Option<TeamId> {
        if name.trim().is_empty() {
            return None;
        }

        if let Some(cached) = self.cache.get(name) {
            trace!("Cache hit for {name:?}");
            return cached;
        }

        let resolved = self.resolve_uncached(name);
        self.cache.insert(name, resolved.clone());
        resolved
    }

    /// `resolve(name).is_some()`.
    pub fn has_match(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Resolve with score and ranked alternatives. Bypasses the cache.
    ///
    /// The chosen ID always agrees with [`TeamMatcher::resolve`].
    pub fn resolve_with_detail(&self, name: &str) -> Option<MatchResult> {
        if name.trim().is_empty() {
            return None;
        }

        if let Some(entry) = self.exact_entry(name) {
            let reference = self.table.get(entry)?;
            return Some(MatchResult {
                id: reference.id.clone(),
                matched_name: reference.canonical_name.clone(),
                score: EXACT_SCORE,
                alternatives: Vec::new(),
            });
        }

        let mut scored = self.score_candidates(name);
        sort_scored_deterministic(&mut scored);

        let floor = self.config.alternative_floor();
        let alternatives: Vec<Alternative> = scored
            .iter()
            .filter(|candidate| candidate.score >= floor)
            .take(MAX_ALTERNATIVES)
            .map(|candidate| Alternative {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                score: candidate.score,
                is_valid: candidate.is_valid,
            })
            .collect();

        scored.retain(|candidate| candidate.is_valid);
        let winner = pick_preferred(&scored, self.config.lower_id_preference_threshold)?;

        Some(MatchResult {
            id: winner.id.clone(),
            matched_name: winner.name.clone(),
            score: winner.score,
            alternatives,
        })
    }

    fn resolve_uncached(&self, name: &str) -> Option<TeamId> {
        if let Some(entry) = self.exact_entry(name) {
            return self.table.get(entry).map(|reference| reference.id.clone());
        }

        let mut valid: Vec<ScoredCandidate> = self
            .score_candidates(name)
            .into_iter()
            .filter(|candidate| candidate.is_valid)
            .collect();
        sort_scored_deterministic(&mut valid);

        let winner = pick_preferred(&valid, self.config.lower_id_preference_threshold)
            .map(|candidate| candidate.id.clone());

        #[cfg(feature = "debug_matcher")]
        debug!(
            "[MATCHER_CALIBRATION] resolved: query={:?} valid={} winner={:?}",
            name,
            valid.len(),
            winner
        );

        winner
    }

    fn exact_entry(&self, name: &str) -> Option<usize> {
        self.indexes.exact_by_name.get(name).copied()
    }

    /// Score and validate every selected candidate, in selection order.
    fn score_candidates(&self, name: &str) -> Vec<ScoredCandidate> {
        let query_norm = normalize(name);
        let candidates = select_candidates(
            &query_norm,
            &self.table,
            &self.indexes,
            self.config.enable_fuzzy_matching,
        );

        candidates
            .into_iter()
            .filter_map(|candidate| {
                let reference = self.table.get(candidate.entry)?;
                let candidate_norm = self.indexes.normalized_name(candidate.entry);
                let score = similarity_normalized(&query_norm, candidate_norm);
                let is_valid = score >= self.config.similarity_threshold
                    && self.validator.is_acceptable_pair(
                        NamePair::new(name, &query_norm),
                        NamePair::new(&reference.canonical_name, candidate_norm),
                        score,
                    );

                Some(ScoredCandidate {
                    entry: candidate.entry,
                    id: candidate.id,
                    name: reference.canonical_name.clone(),
                    score,
                    is_valid,
                })
            })
            .collect()
    }

    // ==================== CACHE ====================

    /// Drop every cached resolution and reset the hit/miss counters.
    pub fn clear_cache(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        debug!("Resolution cache cleared ({dropped} entries)");
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            total_entries: self.table.len(),
            hits: self.cache.hits(),
            misses: self.cache.misses(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/pipeline/resolver_tests.rs"]
mod tests;
