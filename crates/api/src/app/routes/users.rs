use serde_json::Value;

use storefront_auth::{Role, User};
use storefront_core::UserId;

use crate::app::dto::{self, UpdateUserRequest};
use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::services::AppServices;

use super::parse_id;

pub fn list_users(services: &AppServices) -> Result<Reply, ApiError> {
    let users = services.stores.users.list()?;
    Ok(Reply::ok(Value::Array(
        users.iter().map(dto::user_to_json).collect(),
    )))
}

pub fn view_user(services: &AppServices, id: &str) -> Result<Reply, ApiError> {
    let user = find_user(services, id)?;
    Ok(Reply::ok(dto::user_to_json(&user)))
}

/// Change a user's role. Nothing else about a user is editable here.
pub fn update_user(services: &AppServices, id: &str, body: Option<Value>) -> Result<Reply, ApiError> {
    let request: UpdateUserRequest = dto::parse_body(body)?;
    let role: Role = request
        .role
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Role is missing"))?
        .parse()
        .map_err(|e: storefront_auth::UnknownRole| ApiError::bad_request(e.to_string()))?;

    let user = find_user(services, id)?.with_role(role);
    services.stores.users.save(user.clone())?;
    tracing::info!(user_id = %user.id, %role, "user role updated");

    Ok(Reply::ok(dto::user_to_json(&user)))
}

pub fn delete_user(services: &AppServices, id: &str) -> Result<Reply, ApiError> {
    let id: UserId = parse_id(id)?;
    let deleted = services
        .stores
        .users
        .delete(&id)?
        .ok_or(ApiError::ResourceNotFound)?;
    tracing::info!(user_id = %deleted.id, "user deleted");

    Ok(Reply::ok(dto::user_to_json(&deleted)))
}

fn find_user(services: &AppServices, id: &str) -> Result<User, ApiError> {
    let id: UserId = parse_id(id)?;
    services
        .stores
        .users
        .find(&id)?
        .ok_or(ApiError::ResourceNotFound)
}
