use chrono::Utc;
use serde_json::Value;

use storefront_core::OrderId;
use storefront_orders::OrderInput;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::services::AppServices;
use crate::authz::{self, AuthDecision, Ownership};
use crate::context::RequestContext;

use super::parse_id;

/// Admins see every order; customers only their own.
pub fn list_orders(services: &AppServices, ctx: &RequestContext) -> Result<Reply, ApiError> {
    let user = ctx.user()?;
    let orders = services
        .stores
        .orders
        .list()?
        .into_iter()
        .filter(|order| user.is_admin() || order.is_owned_by(&user.id))
        .map(|order| dto::order_to_json(&order))
        .collect();

    Ok(Reply::ok(Value::Array(orders)))
}

/// Place an order for the calling customer. A `customerId` in the body is ignored.
pub fn create_order(
    services: &AppServices,
    ctx: &RequestContext,
    body: Option<Value>,
) -> Result<Reply, ApiError> {
    let user = ctx.user()?;
    let input: OrderInput = dto::parse_body(body)?;
    let order = input.place(user.id.clone(), Utc::now())?;

    services.stores.orders.save(order.clone())?;
    tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "order placed");

    Ok(Reply::created(dto::order_to_json(&order)))
}

pub fn view_order(services: &AppServices, ctx: &RequestContext, id: &str) -> Result<Reply, ApiError> {
    let user = ctx.user()?;
    let id: OrderId = parse_id(id)?;
    let order = services
        .stores
        .orders
        .find(&id)?
        .ok_or(ApiError::ResourceNotFound)?;

    let decision = authz::decide(
        ctx.route(),
        ctx.method(),
        Some(user),
        Ownership::OwnedBy(&order.customer_id),
    );
    if decision == AuthDecision::NotFound {
        tracing::debug!(order_id = %order.id, user_id = %user.id, "order belongs to another customer");
        return Err(ApiError::OwnershipViolation);
    }
    decision.into_result()?;

    Ok(Reply::ok(dto::order_to_json(&order)))
}
