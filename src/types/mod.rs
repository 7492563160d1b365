pub mod errors;

pub use errors::{MatcherError, MatcherResult};
