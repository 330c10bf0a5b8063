//! Database Module
//!
//! The slow data source that sits behind the cache.
//!
//! A record that does not exist is reported as `Ok(None)`; errors are
//! reserved for the source itself failing.

mod memory;

use async_trait::async_trait;

use crate::error::DatabaseError;

pub use memory::InMemoryDatabase;

// == Database Trait ==
/// Key-value lookup against an external source.
#[async_trait]
pub trait Database: Send + Sync {
    /// Fetches the record stored under `id`.
    async fn get_by_id(&self, id: &str) -> Result<Option<String>, DatabaseError>;

    /// Writes a record, replacing any previous one.
    async fn set_by_id(&self, id: &str, value: String) -> Result<(), DatabaseError>;
}
