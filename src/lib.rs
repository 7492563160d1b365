pub mod services;
pub mod types;

pub use services::matching::{
    normalize, similarity, Alternative, BatchProgress, CacheStats, DisambiguationRule,
    MatchResult, MatchValidator, MatcherConfig, ReferenceEntry, ReferenceTable, TeamId,
    TeamMatcher,
};
pub use types::errors::{MatcherError, MatcherResult};
