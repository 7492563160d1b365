//! Batch resolution over the shared resolution cache.

use std::collections::{HashMap, HashSet};

use log::debug;
use rayon::prelude::*;

use crate::services::matching::models::types::{BatchProgress, TeamId};
use crate::services::matching::pipeline::resolver::TeamMatcher;

impl TeamMatcher {
    /// Resolve many names at once. See [`TeamMatcher::resolve_batch_with_progress`].
    pub fn resolve_batch<S: AsRef<str>>(&self, names: &[S]) -> HashMap<String, Option<TeamId>> {
        self.resolve_batch_with_progress(names, |_| {})
    }

    /// Resolve many names in chunks of `batch_size`, reporting after each one.
    ///
    /// Blank names are dropped and repeats are resolved once, in order of
    /// first occurrence. Results go through the same cache as `resolve`.
    pub fn resolve_batch_with_progress<S, F>(
        &self,
        names: &[S],
        mut on_progress: F,
    ) -> HashMap<String, Option<TeamId>>
    where
        S: AsRef<str>,
        F: FnMut(BatchProgress<'_>),
    {
        let unique = unique_names(names);
        let total = unique.len();
        let chunk_count = total.div_ceil(self.config().batch_size);
        let mut results: HashMap<String, Option<TeamId>> = HashMap::with_capacity(total);
        let mut processed = 0usize;

        for (chunk_index, chunk) in unique.chunks(self.config().batch_size).enumerate() {
            debug!(
                "Resolving batch chunk {}/{} ({} names)",
                chunk_index + 1,
                chunk_count,
                chunk.len()
            );

            for &name in chunk {
                let resolved = self.resolve(name);
                processed += 1;
                on_progress(BatchProgress {
                    name,
                    id: resolved.as_ref(),
                    processed,
                    total,
                    progress: processed as f64 / total as f64,
                });
                results.insert(name.to_string(), resolved);
            }
        }

        debug!(
            "Batch resolved {} names ({} matched)",
            total,
            results.values().filter(|id| id.is_some()).count()
        );
        results
    }

    /// Same dedup and result map as `resolve_batch`, resolved on the rayon
    /// pool against the shared cache. No progress reporting.
    pub fn resolve_batch_parallel<S>(&self, names: &[S]) -> HashMap<String, Option<TeamId>>
    where
        S: AsRef<str>,
    {
        let unique = unique_names(names);
        debug!("Resolving {} names in parallel", unique.len());

        unique
            .par_iter()
            .map(|&name| (name.to_string(), self.resolve(name)))
            .collect()
    }
}

/// Non-blank names in first-occurrence order, without repeats.
fn unique_names<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
#[path = "../tests/pipeline/batch_tests.rs"]
mod tests;
