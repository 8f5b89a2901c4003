//! Resource handlers.
//!
//! Handlers run only after the dispatcher's authorization decision was
//! `Allow`; they receive the parsed JSON body (if any) and return one
//! [`Reply`] or one [`ApiError`].

use std::str::FromStr;

use axum::http::Method;
use serde_json::Value;

use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::services::AppServices;
use crate::context::RequestContext;
use crate::routing::{Collection, Route};

pub mod orders;
pub mod products;
pub mod register;
pub mod users;

/// Invoke the handler for the request's route and method.
pub fn handle(
    services: &AppServices,
    ctx: &RequestContext,
    body: Option<Value>,
) -> Result<Reply, ApiError> {
    let method = ctx.method().clone();
    match (ctx.route(), method) {
        (Route::Collection(Collection::Register), Method::POST) => {
            register::register(services, body)
        }

        (Route::Collection(Collection::Users), Method::GET) => users::list_users(services),
        (Route::Resource(Collection::Users, id), Method::GET) => users::view_user(services, id),
        (Route::Resource(Collection::Users, id), Method::PUT) => {
            users::update_user(services, id, body)
        }
        (Route::Resource(Collection::Users, id), Method::DELETE) => {
            users::delete_user(services, id)
        }

        (Route::Collection(Collection::Products), Method::GET) => {
            products::list_products(services)
        }
        (Route::Collection(Collection::Products), Method::POST) => {
            products::create_product(services, body)
        }
        (Route::Resource(Collection::Products, id), Method::GET) => {
            products::view_product(services, id)
        }
        (Route::Resource(Collection::Products, id), Method::PUT) => {
            products::update_product(services, id, body)
        }
        (Route::Resource(Collection::Products, id), Method::DELETE) => {
            products::delete_product(services, id)
        }

        (Route::Collection(Collection::Orders), Method::GET) => orders::list_orders(services, ctx),
        (Route::Collection(Collection::Orders), Method::POST) => {
            orders::create_order(services, ctx, body)
        }
        (Route::Resource(Collection::Orders, id), Method::GET) => {
            orders::view_order(services, ctx, id)
        }

        // The policy rejects these before a handler is chosen.
        (Route::Unknown | Route::StaticAsset(_), _) => Err(ApiError::UnknownRoute),
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// Parse an id path segment; an id that cannot exist is simply not found.
fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::ResourceNotFound)
}
