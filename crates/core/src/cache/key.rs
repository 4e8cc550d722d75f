//! Composite cache key derivation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a fetch: the URL plus its content-negotiation
/// hint, hashed so keys stay uniform regardless of URL length.
pub fn compute_cache_key(url: &str, accept: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(b"\n");
    hasher.update(accept.as_bytes());
    hex::encode(hasher.finalize())
}
