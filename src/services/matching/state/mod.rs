pub mod reference_table;
pub mod resolution_cache;
