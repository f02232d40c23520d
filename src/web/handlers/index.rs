//! Submission page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

/// Template for the submission page.
///
/// Renders `templates/index.html`. The page script posts the form to
/// `/shorten` and shows the issued code behind `base_url`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Shown in front of issued codes; empty means the page's own origin.
    pub base_url: String,
    pub max_url_length: usize,
}

/// Renders the submission page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        base_url: state.public_base_url.clone().unwrap_or_default(),
        max_url_length: state.link_service.max_url_length(),
    }
}
