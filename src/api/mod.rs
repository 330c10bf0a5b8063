//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /get/:id` - Read-through lookup
//! - `PUT /set` - Store a value directly in the cache
//! - `DELETE /expired` - Remove expired entries
//! - `DELETE /cache` - Remove all entries
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
