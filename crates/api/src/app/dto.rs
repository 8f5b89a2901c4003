use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use storefront_auth::User;
use storefront_orders::{Order, OrderItem};
use storefront_products::Product;

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// `PUT /api/users/{id}` body. Only the role can change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode an already-read JSON body into `T`.
///
/// A missing body decodes as `{}` so schema validation, not the decoder,
/// reports which fields are absent.
pub fn parse_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ApiError> {
    let body = body.unwrap_or_else(|| json!({}));
    serde_json::from_value(body).map_err(|e| ApiError::bad_request(format!("Invalid body: {e}")))
}

// -------------------------
// Response mapping
// -------------------------

/// Public view of a user; the password hash never leaves the process.
pub fn user_to_json(user: &User) -> Value {
    json!({
        "_id": user.id,
        "name": user.name,
        "email": user.email,
        "role": user.role,
    })
}

pub fn product_to_json(product: &Product) -> Value {
    let mut body = json!({
        "_id": product.id,
        "name": product.name,
        "price": product.price,
    });
    if let Some(image) = &product.image {
        body["image"] = json!(image);
    }
    if let Some(description) = &product.description {
        body["description"] = json!(description);
    }
    body
}

pub fn order_to_json(order: &Order) -> Value {
    json!({
        "_id": order.id,
        "customerId": order.customer_id,
        "items": order.items.iter().map(order_item_to_json).collect::<Vec<_>>(),
        "placedAt": order.placed_at.to_rfc3339(),
        "total": order.total(),
    })
}

fn order_item_to_json(item: &OrderItem) -> Value {
    let mut product = json!({
        "_id": item.product.id,
        "name": item.product.name,
        "price": item.product.price,
    });
    if let Some(description) = &item.product.description {
        product["description"] = json!(description);
    }
    json!({
        "product": product,
        "quantity": item.quantity,
    })
}
