//! Browser-facing route configuration.

use crate::state::AppState;
use crate::web::handlers::index_handler;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;

/// URL prefix of the static asset directory.
pub const ASSETS_PREFIX: &str = "/public";

/// Submission page and its static assets.
///
/// # Endpoints
///
/// - `GET /`          - Submission page
/// - `GET /public/*`  - Files from `static_dir`
pub fn public_routes(static_dir: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .nest_service(ASSETS_PREFIX, ServeDir::new(static_dir))
}
