pub mod candidates;
pub mod indexes;
pub mod scoring;
pub mod validation;
