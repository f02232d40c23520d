//! Application error type and its HTTP mapping.
//!
//! Every error renders as a short plain-text message meant for the person who
//! submitted the request. Lookups rejected for containing query-sensitive
//! characters are answered with a redirect to the home page instead.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::utils::alphabet::AlphabetError;
use crate::utils::sanitizer::SanitizeError;

/// Errors surfaced by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No URL was submitted.
    #[error("Enter a URL above and hit submit!")]
    EmptyInput,

    /// The submitted URL exceeds the configured bound.
    #[error("Sorry, but that URL is too long. The limit is {max} characters.")]
    InputTooLong { length: usize, max: usize },

    /// No record matches the requested short code.
    #[error("That does not match any stored link :(")]
    NotFound { code: String },

    /// The short code contains characters that could alter a store query.
    #[error("Short code {code:?} contains characters that are not allowed")]
    InjectionRejected { code: String },

    /// The store already holds a record for this short code.
    #[error("Short code {code} is already taken")]
    Conflict { code: String },

    /// The store is unavailable or a write did not complete.
    #[error("Storage is unavailable, please try again later")]
    Persistence { message: String },

    /// Stored data could not be interpreted.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput | AppError::InputTooLong { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InjectionRejected { .. } => StatusCode::FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Persistence { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InjectionRejected { .. } => {
                return (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response();
            }
            AppError::Persistence { message } => error!("Persistence failure: {}", message),
            AppError::Internal { message } => error!("Internal error: {}", message),
            _ => {}
        }

        (self.status_code(), self.to_string()).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::persistence(e.to_string())
    }
}

impl From<SanitizeError> for AppError {
    fn from(e: SanitizeError) -> Self {
        match e {
            SanitizeError::EmptyInput => AppError::EmptyInput,
            SanitizeError::InputTooLong { length, max } => AppError::InputTooLong { length, max },
            other => AppError::internal(format!("Corrupt record: {other}")),
        }
    }
}

impl From<AlphabetError> for AppError {
    fn from(e: AlphabetError) -> Self {
        AppError::internal(format!("Corrupt short code: {e}"))
    }
}
