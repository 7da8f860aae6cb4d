//! Per-chunk render hook.

use placeholder::{first_placeholder, rewrite, HashRegistry};

use crate::bundle::{ChunkInfo, OutputEntry};
use crate::chunk_map::{build_chunk_map, ChunkMap};
use crate::hash::{ContentHasher, Sha256Hasher};
use crate::srcmap::{boundary_map, SourceMap};

/// Rendered output for one chunk: substituted code plus a fresh source map
/// over it.
#[derive(Debug)]
pub struct RenderedChunk {
    pub code: String,
    pub map: SourceMap,
}

/// Build-scoped render state. Owns the placeholder registry and the hashing
/// primitive; create one per build invocation. Sharing a context across
/// incremental rebuilds is safe because placeholders are content-derived and
/// stable.
pub struct RenderContext {
    registry: HashRegistry,
    hasher: Box<dyn ContentHasher>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self::with_hasher(Box::new(Sha256Hasher))
    }

    /// Use the host bundler's own hashing primitive instead of the default.
    pub fn with_hasher(hasher: Box<dyn ContentHasher>) -> Self {
        Self {
            registry: HashRegistry::new(),
            hasher,
        }
    }

    pub fn registry(&self) -> &HashRegistry {
        &self.registry
    }

    /// Render hook, invoked once per chunk per pass with the chunk's code and
    /// the view of every chunk known in the pass.
    ///
    /// All known chunks are registered before this chunk's code is rewritten,
    /// so references to chunks that have not rendered yet still resolve and
    /// invocation order within the pass does not affect the final mapping.
    pub fn render_chunk(&mut self, code: &str, chunks: &[ChunkInfo]) -> RenderedChunk {
        for chunk in chunks {
            let Some(token) = first_placeholder(&chunk.file_name) else {
                continue;
            };
            if matches!(self.registry.resolve(token), Some(hash) if !hash.is_empty()) {
                continue;
            }
            // Chunks without a facade module still get a deterministic hash.
            let input = chunk.facade_module_id.as_deref().unwrap_or(&chunk.file_name);
            let hash = self.hasher.hash(input);
            self.registry.register(token, hash);
        }

        let code = rewrite(code, &self.registry);
        let map = boundary_map(&code, None);
        RenderedChunk { code, map }
    }

    /// Public chunk-map artifact for the whole bundle, with an optional base
    /// prefix applied to both sides of every entry.
    pub fn build_chunk_map(&self, bundle: &[OutputEntry], base: &str) -> ChunkMap {
        build_chunk_map(bundle, base, &self.registry)
    }
}
