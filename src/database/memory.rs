//! In-memory database with simulated latency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::Database;
use crate::error::DatabaseError;

/// HashMap-backed source where every read costs `latency`.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    records: RwLock<HashMap<String, String>>,
    latency: Duration,
    /// Number of reads served so far
    reads: AtomicU64,
}

impl InMemoryDatabase {
    pub fn new(latency: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            latency,
            reads: AtomicU64::new(0),
        }
    }

    /// Creates a database pre-filled with `records`.
    pub fn with_records<I, K, V>(latency: Duration, records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let records = records
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            records: RwLock::new(records),
            latency,
            reads: AtomicU64::new(0),
        }
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn get_by_id(&self, id: &str) -> Result<Option<String>, DatabaseError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        debug!(id, "database access");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn set_by_id(&self, id: &str, value: String) -> Result<(), DatabaseError> {
        self.records.write().await.insert(id.to_string(), value);
        Ok(())
    }
}
