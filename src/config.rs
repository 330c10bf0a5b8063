//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::Ttl;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds, `None` = entries never expire
    pub cache_ttl: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Simulated latency of every database read, in milliseconds
    pub db_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - TTL in seconds, or `never` (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `DB_LATENCY_MS` - Simulated database latency (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| parse_ttl(&v))
                .unwrap_or(defaults.cache_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            db_latency_ms: env::var("DB_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db_latency_ms),
        }
    }

    /// TTL the cache should be built with.
    pub fn ttl(&self) -> Ttl {
        match self.cache_ttl {
            Some(secs) => Ttl::After(Duration::from_secs(secs)),
            None => Ttl::Never,
        }
    }

    pub fn db_latency(&self) -> Duration {
        Duration::from_millis(self.db_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: Some(5),
            server_port: 8080,
            cleanup_interval: 1,
            db_latency_ms: 0,
        }
    }
}

/// `never` disables expiry; anything else must be a number of seconds.
fn parse_ttl(raw: &str) -> Option<Option<u64>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("never") {
        return Some(None);
    }
    raw.parse().ok().map(Some)
}
