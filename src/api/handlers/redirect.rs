//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes containing `$` or `.` with a redirect to `/`
/// 2. Reject codes with symbols outside the alphabet with 404, without a lookup
/// 3. Check cache for the restored target
/// 4. On cache miss, load and restore the record, then cache it asynchronously
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist and 503 if the store
/// is unavailable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let code = state.link_service.parse_lookup_code(&code)?;

    let target = match state.cache.get_url(code.as_str()).await {
        Ok(Some(cached)) => {
            debug!("Cache HIT for {}", code);
            cached
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);
            let target = state.link_service.resolve(&code).await?;

            // Fire-and-forget cache write
            let cache = state.cache.clone();
            let key = code.as_str().to_string();
            let value = target.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&key, &value, None).await {
                    error!("Failed to cache redirect target: {}", e);
                }
            });

            target
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.link_service.resolve(&code).await?
        }
    };

    found(&target)
}

/// Bytes escaped in the `Location` header: controls, space, `"`, `<`, `>` and
/// `` ` ``. Non-ASCII is always escaped as UTF-8. `%` is left alone so existing
/// escapes pass through unchanged.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Builds a 302 response.
///
/// Stored URLs are restored byte for byte, so the target is percent-encoded
/// here to always form a valid header value.
fn found(target: &str) -> Result<Response, AppError> {
    let encoded = utf8_percent_encode(target, LOCATION_ENCODE_SET).to_string();
    let location = HeaderValue::from_str(&encoded)
        .map_err(|_| AppError::internal("restored URL is not a valid Location header"))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
