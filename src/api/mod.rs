//! API Module
//!
//! HTTP handlers and routing for the stats service REST API.
//!
//! # Endpoints
//! - `GET /players/:name/stats` - Stats for one roster member
//! - `POST /players/:name/refresh` - Force-refresh one roster member
//! - `GET /team/stats` - Roster-wide stats with totals
//! - `GET /cache/stats` - Cache statistics and queue depth
//! - `POST /cache/flush` - Administrative cache flush
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
