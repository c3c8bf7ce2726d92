//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/generate`: prompt-to-video generation through a hosted model
//! - The browser page that drives it
//! - Per-IP rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
pub use routes::create_router;
pub use state::AppState;
