use std::collections::HashMap;
use std::path::Path;

use log::warn;

use crate::services::matching::core::normalizer;
use crate::services::matching::models::types::{ReferenceEntry, TeamId};
use crate::types::errors::{MatcherError, MatcherResult};

/// The ordered reference table of known teams.
///
/// Loaded once and never mutated. Rows with an empty ID, or whose name
/// normalizes to nothing, are skipped. A repeated ID keeps the position of
/// its first occurrence and takes the name of its last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    /// Build a table from `(id, name)` pairs in the given order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<ReferenceEntry> = Vec::new();
        let mut positions: HashMap<TeamId, usize> = HashMap::new();

        for (raw_id, raw_name) in pairs {
            let raw_id: String = raw_id.into();
            let name: String = raw_name.into();

            if raw_id.trim().is_empty() {
                warn!("Skipping reference row with empty id (name: {name:?})");
                continue;
            }
            if normalizer::normalize(&name).is_empty() {
                warn!("Skipping reference row {raw_id:?}: name {name:?} normalizes to nothing");
                continue;
            }

            let id = TeamId::new(raw_id);
            if let Some(&position) = positions.get(&id) {
                warn!(
                    "Duplicate reference id {id}: {:?} replaced by {name:?}",
                    entries[position].canonical_name
                );
                entries[position].canonical_name = name;
                continue;
            }

            positions.insert(id.clone(), entries.len());
            entries.push(ReferenceEntry {
                id,
                canonical_name: name,
            });
        }

        Self { entries }
    }

    /// Build a table from already-typed entries, applying the same row rules.
    pub fn from_entries(entries: impl IntoIterator<Item = ReferenceEntry>) -> Self {
        Self::from_pairs(
            entries
                .into_iter()
                .map(|entry| (entry.id.as_str().to_string(), entry.canonical_name)),
        )
    }

    /// Load from JSON string.
    /// Supports the object format `{"<id>": "<name>", ...}` and the array
    /// format `[{"id": ..., "name": ...}, ...]`.
    ///
    /// Object keys are visited integer-like keys first (ascending), then the
    /// remaining keys in document order.
    pub fn from_json(json: &str) -> MatcherResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| MatcherError::ReferenceTable(format!("Failed to parse JSON: {e}")))?;

        match value {
            serde_json::Value::Object(map) => {
                let mut indexed: Vec<(u32, String, String)> = Vec::new();
                let mut named: Vec<(String, String)> = Vec::new();

                for (key, value) in map {
                    let Some(name) = value.as_str() else {
                        warn!("Skipping reference row {key:?}: name is not a string");
                        continue;
                    };
                    match array_index(&key) {
                        Some(index) => indexed.push((index, key, name.to_string())),
                        None => named.push((key, name.to_string())),
                    }
                }

                indexed.sort_by_key(|(index, _, _)| *index);
                let ordered = indexed
                    .into_iter()
                    .map(|(_, key, name)| (key, name))
                    .chain(named);
                Ok(Self::from_pairs(ordered))
            }
            serde_json::Value::Array(_) => {
                let entries: Vec<ReferenceEntry> = serde_json::from_value(value).map_err(|e| {
                    MatcherError::ReferenceTable(format!("Failed to parse entries array: {e}"))
                })?;
                Ok(Self::from_entries(entries))
            }
            _ => Err(MatcherError::ReferenceTable(
                "Invalid reference table format: expected object or array".to_string(),
            )),
        }
    }

    /// Read and parse a JSON reference file.
    pub fn from_path(path: &Path) -> MatcherResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| MatcherError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical array-index keys (`"0"`, `"17"`, not `"017"`), which plain
/// JSON object iteration visits before every other key.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

#[cfg(test)]
#[path = "../tests/state/reference_table_tests.rs"]
mod tests;
