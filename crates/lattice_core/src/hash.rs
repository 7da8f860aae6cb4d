//! Content hashing seam.

use sha2::{Digest, Sha256};

/// Deterministic content hash, normally the host bundler's own primitive.
/// Injected so placeholder resolutions stay consistent with whatever scheme
/// assigned the preliminary filenames.
pub trait ContentHasher {
    fn hash(&self, input: &str) -> String;
}

pub const DEFAULT_HASH_LEN: usize = 8;

/// Default hasher: SHA-256 hex, truncated to [`DEFAULT_HASH_LEN`] chars.
/// Hex output contains no placeholder delimiters, which keeps rewriting
/// idempotent.
#[derive(Debug, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn hash(&self, input: &str) -> String {
        let digest = Sha256::digest(input.as_bytes());
        let hex = format!("{digest:x}");
        hex[..DEFAULT_HASH_LEN].to_string()
    }
}
