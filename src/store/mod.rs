//! Store Module
//!
//! The key/value contract the result cache is written against, and an
//! in-process implementation with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreResult;

pub use entry::StoreEntry;
pub use lru::LruTracker;
pub use memory::MemoryStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key Value Store ==
/// Byte-oriented key/value store with per-key expiry.
///
/// Implementations may be shared by unrelated components, so callers are
/// expected to namespace their keys with a prefix.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or None when absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    /// A zero `ttl` stores the value without expiry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()>;

    /// Removes the given keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> StoreResult<usize>;

    /// Lists live keys starting with `prefix`.
    async fn keys(&self, prefix: &str) -> StoreResult<Vec<String>>;
}
