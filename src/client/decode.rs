//! Status-gated decoding of HTTP responses.
//!
//! A response is parsed into the caller's type only when its status matches
//! the expected one. Anything else becomes [`DecodeError::UnexpectedStatus`]
//! after the body has been logged, truncated, at debug level.

use crate::error::{DecodeError, DecodeResult};
use log::debug;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Upper bound on how much of a rejected body ends up in the log.
pub const MAX_DIAGNOSTIC_BODY_BYTES: usize = 4096;

/// Decode `response` into `T` when its status is `expected_status`.
///
/// On a status mismatch the body is read best-effort; a failure to read it
/// is ignored and never replaces the status error.
pub async fn decode_response<T: DeserializeOwned>(
    api_name: &str,
    response: Response,
    expected_status: StatusCode,
) -> DecodeResult<T> {
    let status = response.status();

    if status != expected_status {
        let body = response.bytes().await.unwrap_or_default();
        debug!(
            "body of unexpected response from {}: {}",
            api_name,
            bounded_body(&body)
        );
        return Err(DecodeError::UnexpectedStatus {
            api: api_name.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(|source| DecodeError::Body {
        api: api_name.to_string(),
        source,
    })?;
    decode_body(api_name, &body)
}

/// Parse an already-read body into `T`.
pub fn decode_body<T: DeserializeOwned>(api_name: &str, body: &[u8]) -> DecodeResult<T> {
    serde_json::from_slice(body).map_err(|source| {
        debug!(
            "body of undecodable response from {}: {}",
            api_name,
            bounded_body(body)
        );
        DecodeError::Parse {
            api: api_name.to_string(),
            source,
        }
    })
}

/// Lossy UTF-8 view of at most [`MAX_DIAGNOSTIC_BODY_BYTES`] of `body`.
pub(crate) fn bounded_body(body: &[u8]) -> Cow<'_, str> {
    if body.len() <= MAX_DIAGNOSTIC_BODY_BYTES {
        return String::from_utf8_lossy(body);
    }

    let head = String::from_utf8_lossy(&body[..MAX_DIAGNOSTIC_BODY_BYTES]);
    Cow::Owned(format!(
        "{head}... ({} more bytes)",
        body.len() - MAX_DIAGNOSTIC_BODY_BYTES
    ))
}
