//! Handler for link shortening endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::shorten::ShortenRequest;
use crate::application::services::ShortenOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a long URL and returns its short code.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// Form field or JSON property `longURL`.
///
/// # Response
///
/// - **200 OK**: the issued code as plain text
/// - **204 No Content**: the input was the browser favicon probe
/// - **400 Bad Request**: empty or over-long input
/// - **503 Service Unavailable**: the code or record could not be saved
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: ShortenRequest,
) -> Result<Response, AppError> {
    match state.link_service.shorten(&payload.long_url).await? {
        ShortenOutcome::Created(code) => Ok((StatusCode::OK, code.into_inner()).into_response()),
        ShortenOutcome::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
