//! SHA-256 content digests used as the dedup key.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const CONTENT_HASH_LEN: usize = 64;

/// Compute the SHA-256 digest of `data` as lowercase hex.
///
/// Only the bytes participate; file names never do.
pub fn compute_content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check that `hash` looks like a hex SHA-256 digest (either case).
pub fn is_valid_content_hash(hash: &str) -> bool {
    hash.len() == CONTENT_HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Lower-case a digest supplied by a client so it matches stored values.
///
/// Returns `None` when `hash` is not a valid digest.
pub fn normalize_content_hash(hash: &str) -> Option<String> {
    let trimmed = hash.trim();
    is_valid_content_hash(trimmed).then(|| trimmed.to_ascii_lowercase())
}
