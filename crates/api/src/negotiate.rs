//! Content negotiation: `Accept` on every API request, `Content-Type` on bodies.

use axum::http::{HeaderMap, Method, header};

use crate::app::errors::ApiError;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// `true` when the client takes JSON.
///
/// An absent header, `*/*`, or any listed media type equal to
/// `application/json` (parameters ignored) is acceptable.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT) else {
        return true;
    };
    let Ok(accept) = accept.to_str() else {
        return false;
    };
    if accept.trim() == "*/*" {
        return true;
    }
    accept.split(',').any(|token| {
        let media_type = token.split(';').next().unwrap_or_default().trim();
        media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE)
    })
}

/// `true` when the request body is declared as JSON.
pub fn is_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}

pub fn carries_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT
}

/// Reject requests the API cannot answer or read.
pub fn negotiate(method: &Method, headers: &HeaderMap) -> Result<(), ApiError> {
    if !accepts_json(headers) {
        return Err(ApiError::UnacceptableContentType);
    }
    if carries_body(method) && !is_json_body(headers) {
        return Err(ApiError::bad_request(
            "Invalid Content-Type. Expected application/json",
        ));
    }
    Ok(())
}
