//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::packing::{oversized_pack, validate};

/// Pack sizes used when nothing else is configured.
pub const DEFAULT_PACK_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

/// Largest pack size accepted unless configured otherwise.
pub const DEFAULT_MAX_PACK_SIZE: i64 = 1_000_000;

/// Result cache policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether results are memoized at all
    pub enabled: bool,
    /// TTL of a freshly stored entry
    pub initial_ttl: Duration,
    /// Ceiling the TTL grows towards
    pub max_ttl: Duration,
    /// Budget for each backing store call
    pub op_timeout: Duration,
    /// Capacity of the in-process store
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_ttl: Duration::from_secs(5 * 60),
            max_ttl: Duration::from_secs(24 * 60 * 60),
            op_timeout: Duration::from_millis(250),
            max_entries: 10_000,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Pack sizes active until changed through the API
    pub pack_sizes: Vec<i64>,
    /// Largest order quantity the API accepts
    pub max_order_items: i64,
    /// Largest pack size accepted from requests, config updates and `PACK_SIZES`
    pub max_pack_size: i64,
    /// Entries returned by the history endpoint
    pub history_limit: usize,
    /// Entries kept in history before the oldest are dropped
    pub history_capacity: usize,
    /// Background sweep interval for expired store entries, in seconds
    pub cleanup_interval: u64,
    pub cache: CacheConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `PACK_SIZES` - Comma separated pack sizes (default: 250,500,1000,2000,5000)
    /// - `MAX_ORDER_ITEMS` - Largest accepted order (default: 10000000)
    /// - `MAX_PACK_SIZE` - Largest accepted pack size (default: 1000000)
    /// - `HISTORY_LIMIT` - History entries returned (default: 20)
    /// - `HISTORY_CAPACITY` - History entries retained (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expired entry sweep frequency in seconds (default: 30)
    /// - `CACHE_ENABLED` - Enable result caching (default: true)
    /// - `CACHE_INITIAL_TTL` - Initial entry TTL in seconds (default: 300)
    /// - `CACHE_MAX_TTL` - Maximum entry TTL in seconds (default: 86400)
    /// - `CACHE_MAX_ENTRIES` - Store capacity (default: 10000)
    /// - `CACHE_OP_TIMEOUT_MS` - Store call timeout in milliseconds (default: 250)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let cache_defaults = defaults.cache.clone();
        let max_pack_size = env_or("MAX_PACK_SIZE", defaults.max_pack_size);
        let max_pack_size = if max_pack_size > 0 {
            max_pack_size
        } else {
            defaults.max_pack_size
        };

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            pack_sizes: env::var("PACK_SIZES")
                .ok()
                .and_then(|v| parse_pack_sizes(&v, max_pack_size))
                .unwrap_or(defaults.pack_sizes),
            max_order_items: env_or("MAX_ORDER_ITEMS", defaults.max_order_items),
            max_pack_size,
            history_limit: env_or("HISTORY_LIMIT", defaults.history_limit),
            history_capacity: env_or("HISTORY_CAPACITY", defaults.history_capacity),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval).max(1),
            cache: CacheConfig {
                enabled: env::var("CACHE_ENABLED")
                    .ok()
                    .and_then(|v| parse_bool(&v))
                    .unwrap_or(cache_defaults.enabled),
                initial_ttl: env_secs("CACHE_INITIAL_TTL").unwrap_or(cache_defaults.initial_ttl),
                max_ttl: env_secs("CACHE_MAX_TTL").unwrap_or(cache_defaults.max_ttl),
                op_timeout: env::var("CACHE_OP_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|&ms: &u64| ms > 0)
                    .map(Duration::from_millis)
                    .unwrap_or(cache_defaults.op_timeout),
                max_entries: env_or("CACHE_MAX_ENTRIES", cache_defaults.max_entries),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            pack_sizes: DEFAULT_PACK_SIZES.to_vec(),
            max_order_items: 10_000_000,
            max_pack_size: DEFAULT_MAX_PACK_SIZE,
            history_limit: 20,
            history_capacity: 1000,
            cleanup_interval: 30,
            cache: CacheConfig::default(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

/// Parses "250, 500,1000" into sizes; None unless every size is a positive
/// integer no larger than `max_pack_size`.
pub fn parse_pack_sizes(raw: &str, max_pack_size: i64) -> Option<Vec<i64>> {
    let sizes: Vec<i64> = raw
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    (validate(&sizes) && oversized_pack(&sizes, max_pack_size).is_none()).then_some(sizes)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
