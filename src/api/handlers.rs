//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::database::Database;
use crate::error::{ApiError, CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, LookupResponse, SetRequest, SetResponse, StatsResponse,
    SweepResponse,
};

/// Cache of database records; `None` caches "no such record".
pub type RecordCache = TtlCache<Option<String>>;

/// Application state shared across all handlers.
///
/// Built once at startup and handed to the router.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of `database`
    pub cache: Arc<RecordCache>,
    /// Source of truth for cache misses
    pub database: Arc<dyn Database>,
}

impl AppState {
    pub fn new(cache: RecordCache, database: Arc<dyn Database>) -> Self {
        Self {
            cache: Arc::new(cache),
            database,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured TTL is not usable.
    pub fn from_config(
        config: &Config,
        database: Arc<dyn Database>,
    ) -> std::result::Result<Self, CacheError> {
        let cache = TtlCache::new(config.ttl())?;
        Ok(Self::new(cache, database))
    }
}

/// Handler for GET /get/:id
///
/// Serves the record from the cache, loading it from the database on a miss.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LookupResponse>> {
    let database = state.database.clone();
    let (value, cached) = state
        .cache
        .get(&id, |id| async move { database.get_by_id(&id).await })
        .await?;

    Ok(Json(LookupResponse::new(id, value, cached)))
}

/// Handler for PUT /set
///
/// Stores a value directly in the cache under the configured TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), Some(req.value));

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for DELETE /expired
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let removed = state.cache.delete_expired();
    info!("Manual sweep removed {} expired entries", removed);

    Json(SweepResponse { removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear();
    info!("Cache cleared");

    Json(ClearResponse::cleared())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
