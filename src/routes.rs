//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`          - Submission page
//! - `GET  /public/*`  - Static assets
//! - `POST /shorten`   - Shorten a URL
//! - `GET  /health`    - Health check: storage, cache
//! - `GET  /{code}`    - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Path segments the generator must never issue as codes.
pub const RESERVED_CODES: [&str; 3] = ["health", "shorten", "public"];

/// Constructs the application router with all routes and middleware.
///
/// `static_dir` is the directory served under `/public`.
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}

/// All routes with tracing, without path normalization.
pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .merge(web::routes::public_routes(static_dir))
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}
