//! Public preliminary-name to final-name artifact.

use std::collections::HashMap;

use placeholder::{rewrite, HashRegistry};
use serde::Serialize;

use crate::bundle::OutputEntry;

/// Mapping from rewritten preliminary chunk names to final names, one entry
/// per chunk in the bundle. Serializes as a flat JSON object so deployment
/// and CDN tooling can resolve cross-chunk references after the build.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ChunkMap {
    entries: HashMap<String, String>,
    #[serde(skip)]
    collisions: usize,
}

impl ChunkMap {
    pub fn get(&self, preliminary: &str) -> Option<&str> {
        self.entries.get(preliminary).map(String::as_str)
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of chunks whose rewritten preliminary name collided with an
    /// earlier entry. Last write wins; a nonzero count indicates an upstream
    /// naming collision.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Build the chunk map for a whole bundle. Assets are skipped; `base` is
/// prefixed onto both sides of every entry.
pub fn build_chunk_map(bundle: &[OutputEntry], base: &str, registry: &HashRegistry) -> ChunkMap {
    let mut map = ChunkMap::default();
    for chunk in bundle.iter().filter_map(OutputEntry::as_chunk) {
        let key = format!("{}{}", base, rewrite(&chunk.preliminary_file_name, registry));
        let value = format!("{}{}", base, chunk.file_name);
        if let Some(previous) = map.entries.insert(key.clone(), value) {
            map.collisions += 1;
            tracing::warn!(
                key = %key,
                previous = %previous,
                "duplicate chunk map key, keeping the later entry"
            );
        }
    }
    map
}
