//! DTOs for the shortening endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::Deserialize;

use crate::error::AppError;

/// Shorten request body.
///
/// The submission page posts `longURL` as a form field; API clients may send
/// the same field as JSON. A missing field is treated as empty input.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    #[serde(rename = "longURL", default)]
    pub long_url: String,
}

impl<S> FromRequest<S> for ShortenRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|_| AppError::EmptyInput)?;
            Ok(payload)
        } else {
            let Form(payload) = Form::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|_| AppError::EmptyInput)?;
            Ok(payload)
        }
    }
}
