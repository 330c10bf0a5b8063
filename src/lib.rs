//! TTL Cache - a read-through cache server
//!
//! Serves records from an in-memory cache with TTL expiration, loading misses
//! from a slow database with at most one load per key at a time.

pub mod api;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Ttl, TtlCache};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
