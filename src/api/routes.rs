//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes. None require authentication.
///
/// # Endpoints
///
/// - `POST /shorten`  - Store a URL and return its code
/// - `GET  /health`   - Storage and cache health
/// - `GET  /{code}`   - Redirect to the stored URL
///
/// Fixed paths are matched before `/{code}`, and the generator never issues
/// their names as codes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
