use serde_json::Value;

use storefront_core::ProductId;
use storefront_products::{Product, ProductInput};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::services::AppServices;

use super::parse_id;

pub fn list_products(services: &AppServices) -> Result<Reply, ApiError> {
    let products = services.stores.products.list()?;
    Ok(Reply::ok(Value::Array(
        products.iter().map(dto::product_to_json).collect(),
    )))
}

pub fn create_product(services: &AppServices, body: Option<Value>) -> Result<Reply, ApiError> {
    let input: ProductInput = dto::parse_body(body)?;
    let product = input.into_product()?;

    services.stores.products.save(product.clone())?;
    tracing::info!(product_id = %product.id, "product created");

    Ok(Reply::created(dto::product_to_json(&product)))
}

pub fn view_product(services: &AppServices, id: &str) -> Result<Reply, ApiError> {
    let product = find_product(services, id)?;
    Ok(Reply::ok(dto::product_to_json(&product)))
}

/// Partial update: fields absent from the body keep their value.
pub fn update_product(services: &AppServices, id: &str, body: Option<Value>) -> Result<Reply, ApiError> {
    let patch: ProductInput = dto::parse_body(body)?;
    let product = find_product(services, id)?.patched(patch)?;

    services.stores.products.save(product.clone())?;
    tracing::info!(product_id = %product.id, "product updated");

    Ok(Reply::ok(dto::product_to_json(&product)))
}

pub fn delete_product(services: &AppServices, id: &str) -> Result<Reply, ApiError> {
    let id: ProductId = parse_id(id)?;
    let deleted = services
        .stores
        .products
        .delete(&id)?
        .ok_or(ApiError::ResourceNotFound)?;
    tracing::info!(product_id = %deleted.id, "product deleted");

    Ok(Reply::ok(dto::product_to_json(&deleted)))
}

fn find_product(services: &AppServices, id: &str) -> Result<Product, ApiError> {
    let id: ProductId = parse_id(id)?;
    services
        .stores
        .products
        .find(&id)?
        .ok_or(ApiError::ResourceNotFound)
}
