use serde_json::Value;

use storefront_auth::{NewUser, NewUserError, Role};

use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::services::AppServices;
use crate::app::dto;

/// `POST /api/register`: anonymous sign-up, always as a customer.
pub fn register(services: &AppServices, body: Option<Value>) -> Result<Reply, ApiError> {
    let mut input: NewUser = dto::parse_body(body)?;
    // Self-registration cannot choose a role.
    input.role = None;

    input.validate().into_result()?;

    let email = input.email.as_deref().unwrap_or_default().trim().to_string();
    if services.directory().email_in_use(&email)? {
        return Err(ApiError::bad_request("Email already in use"));
    }

    let user = input.into_user(Role::Customer).map_err(|e| match e {
        NewUserError::Invalid(errors) => ApiError::ValidationFailure(errors),
        NewUserError::Password(e) => ApiError::Internal(e.to_string()),
    })?;

    services.stores.users.save(user.clone())?;
    tracing::info!(user_id = %user.id, "customer registered");

    Ok(Reply::created(dto::user_to_json(&user)))
}
