//! Error taxonomy of the HTTP layer and its mapping to responses.
//!
//! Every error renders as `{"error": <code>, "message": <text>}`; validation
//! failures add `"details"` with one message per violated rule.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

use storefront_auth::DirectoryError;
use storefront_core::ValidationErrors;
use storefront_infra::StoreError;

/// Challenge sent with every 401.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="storefront", charset="UTF-8""#;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Not found")]
    UnknownRoute,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not acceptable. Expected application/json")]
    UnacceptableContentType,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Forbidden")]
    InsufficientRole,

    /// Reported exactly like a missing resource.
    #[error("Not found")]
    OwnershipViolation,

    #[error("Validation failed: {0}")]
    ValidationFailure(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Not found")]
    ResourceNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownRoute | ApiError::OwnershipViolation | ApiError::ResourceNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnacceptableContentType => StatusCode::NOT_ACCEPTABLE,
            ApiError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            ApiError::InsufficientRole => StatusCode::FORBIDDEN,
            ApiError::ValidationFailure(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnknownRoute | ApiError::OwnershipViolation | ApiError::ResourceNotFound => {
                "not_found"
            }
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::UnacceptableContentType => "not_acceptable",
            ApiError::AuthenticationRequired => "unauthorized",
            ApiError::InsufficientRole => "forbidden",
            ApiError::ValidationFailure(_) => "validation_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::ValidationFailure(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = match &self {
            ApiError::ValidationFailure(errors) => json_error_with_details(
                self.status(),
                self.code(),
                "Validation failed",
                json!(errors.messages()),
            ),
            // Internal details stay in the log.
            ApiError::Internal(_) => json_error(self.status(), self.code(), "Internal error"),
            other => json_error(other.status(), other.code(), other.to_string()),
        };

        if self.status() == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn json_error_with_details(
    status: StatusCode,
    code: &'static str,
    message: &str,
    details: Value,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message,
            "details": details,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_violation_looks_like_not_found() {
        assert_eq!(ApiError::OwnershipViolation.status(), ApiError::ResourceNotFound.status());
        assert_eq!(ApiError::OwnershipViolation.code(), ApiError::ResourceNotFound.code());
        assert_eq!(
            ApiError::OwnershipViolation.to_string(),
            ApiError::ResourceNotFound.to_string()
        );
    }

    #[test]
    fn unauthorized_carries_basic_challenge() {
        let response = ApiError::AuthenticationRequired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );
    }

    #[test]
    fn forbidden_has_no_challenge() {
        let response = ApiError::InsufficientRole.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn store_failures_are_internal() {
        let err = ApiError::from(StoreError::Unavailable("disk".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
