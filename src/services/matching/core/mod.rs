pub mod normalizer;
pub mod vocabulary;
