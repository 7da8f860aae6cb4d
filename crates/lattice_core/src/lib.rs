//! Lattice Core - chunk naming for content-addressed output
//!
//! Final chunk filenames are content-derived, so code rendered early in the
//! build references other chunks through hash placeholders. This crate
//! resolves those references late: the render hook registers each chunk's
//! facade hash and rewrites chunk code, and the chunk map pairs rewritten
//! preliminary names with final names for deployment tooling.

pub mod bundle;
pub mod chunk_map;
pub mod hash;
pub mod render;
pub mod srcmap;

pub use bundle::{AssetOutput, ChunkInfo, ChunkOutput, OutputEntry};
pub use chunk_map::ChunkMap;
pub use hash::{ContentHasher, Sha256Hasher};
pub use render::{RenderContext, RenderedChunk};
pub use srcmap::SourceMap;
