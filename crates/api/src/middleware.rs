use axum::http::{HeaderMap, header};

use storefront_auth::AuthenticatedUser;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Resolve the caller from the `Authorization` header.
///
/// Anything that is not a usable Basic header (including non-visible-ASCII
/// bytes) is the same as no header at all. A failing user store is an
/// internal error, not an anonymous caller.
pub fn authenticate(
    services: &AppServices,
    headers: &HeaderMap,
) -> Result<Option<AuthenticatedUser>, ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    Ok(services.authenticator.resolve(authorization)?)
}
