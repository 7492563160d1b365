//! Team Matcher: resolves free-form team names to reference-table IDs.
//!
//! Raw names go through normalization, indexed candidate selection, hybrid
//! similarity scoring and heuristic validation, then a lower-ID tie-break.
//! Results are cached per engine instance.
// Module structure
pub mod analysis;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod state;

// Public API
pub use analysis::scoring::similarity;
pub use analysis::validation::MatchValidator;
pub use core::normalizer::normalize;
pub use core::vocabulary::DisambiguationRule;
pub use models::config::MatcherConfig;
pub use models::types::{
    Alternative, BatchProgress, CacheStats, MatchResult, ReferenceEntry, TeamId,
};
pub use pipeline::resolver::TeamMatcher;
pub use state::reference_table::ReferenceTable;
