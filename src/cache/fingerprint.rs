//! Fingerprint Module
//!
//! Deterministic cache keys for (order quantity, pack size set) requests.

use std::fmt;

use sha2::{Digest, Sha256};

/// Prefix of every store key written by the result cache.
pub const CACHE_KEY_PREFIX: &str = "packcalc:";

/// Digest bytes kept in a fingerprint.
const FINGERPRINT_BYTES: usize = 16;

// == Fingerprint ==
/// Truncated SHA-256 digest of a canonicalized request, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which the entry lives in the backing store.
    pub fn store_key(&self) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorts ascending and drops duplicates.
pub fn canonical_pack_sizes(pack_sizes: &[i64]) -> Vec<i64> {
    let mut sizes = pack_sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Derives the fingerprint for a request.
///
/// Input order and duplicate sizes do not affect the result.
pub fn fingerprint(order_quantity: i64, pack_sizes: &[i64]) -> Fingerprint {
    let canonical = canonical_pack_sizes(pack_sizes);
    let data = format!("{}:{:?}", order_quantity, canonical);

    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    let digest = hasher.finalize();

    Fingerprint(hex::encode(&digest[..FINGERPRINT_BYTES]))
}
