//! Read-only view of the host bundler's output.

/// One emitted chunk as reported by the host bundler after name assignment.
/// `preliminary_file_name` may still carry a hash placeholder.
#[derive(Clone, Debug)]
pub struct ChunkOutput {
    pub preliminary_file_name: String,
    pub file_name: String,
    pub facade_module_id: Option<String>,
}

/// A non-chunk output file (css, images, ...). Assets never enter the chunk
/// map.
#[derive(Clone, Debug)]
pub struct AssetOutput {
    pub file_name: String,
}

#[derive(Clone, Debug)]
pub enum OutputEntry {
    Chunk(ChunkOutput),
    Asset(AssetOutput),
}

impl OutputEntry {
    pub fn as_chunk(&self) -> Option<&ChunkOutput> {
        match self {
            OutputEntry::Chunk(chunk) => Some(chunk),
            OutputEntry::Asset(_) => None,
        }
    }
}

/// Per-pass view of a chunk handed to the render hook. At this phase
/// `file_name` may still contain the chunk's own placeholder.
#[derive(Clone, Debug)]
pub struct ChunkInfo {
    pub file_name: String,
    pub facade_module_id: Option<String>,
}

impl From<&ChunkOutput> for ChunkInfo {
    fn from(chunk: &ChunkOutput) -> Self {
        Self {
            file_name: chunk.file_name.clone(),
            facade_module_id: chunk.facade_module_id.clone(),
        }
    }
}
