//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::query::TieBreak;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Result cache TTL in seconds, also advertised as `Cache-Control` max-age
    pub cache_ttl: u64,
    /// Maximum number of cached responses
    pub max_cache_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Secondary ordering among equal timestamps
    pub tie_break: TieBreak,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 300)
    /// - `MAX_CACHE_ENTRIES` - Maximum cached responses (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `TIE_BREAK` - `store` or `id` (default: store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            max_cache_entries: env_or("MAX_CACHE_ENTRIES", defaults.max_cache_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            tie_break: env::var("TIE_BREAK")
                .ok()
                .and_then(|v| TieBreak::parse(&v))
                .unwrap_or(defaults.tie_break),
        }
    }

    /// Cache TTL as a duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            cache_ttl: DEFAULT_TTL_SECS,
            max_cache_entries: DEFAULT_MAX_ENTRIES,
            cleanup_interval: 30,
            tie_break: TieBreak::StoreDefined,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
