use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

pub const ALLOW_HEADERS: &str = "Content-Type,Accept";
pub const MAX_AGE_SECS: &str = "86400";

/// Successful outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json { status: StatusCode, body: Value },
    /// `204` answer to an `OPTIONS` request on a known route.
    Preflight(&'static [Method]),
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Json {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: Value) -> Self {
        Reply::Json {
            status: StatusCode::CREATED,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Json { status, .. } => *status,
            Reply::Preflight(_) => StatusCode::NO_CONTENT,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json { status, body } => (status, axum::Json(body)).into_response(),
            Reply::Preflight(methods) => {
                let allow = methods
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(",");

                let mut response = StatusCode::NO_CONTENT.into_response();
                let headers = response.headers_mut();
                if let Ok(allow) = HeaderValue::from_str(&allow) {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, allow);
                }
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOW_HEADERS),
                );
                headers.insert(
                    header::ACCESS_CONTROL_MAX_AGE,
                    HeaderValue::from_static(MAX_AGE_SECS),
                );
                headers.insert(
                    header::ACCESS_CONTROL_EXPOSE_HEADERS,
                    HeaderValue::from_static("WWW-Authenticate"),
                );
                response
            }
        }
    }
}
