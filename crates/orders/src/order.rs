use chrono::{DateTime, Utc};
use serde::Deserialize;

use storefront_core::{Entity, OrderId, ProductId, UserId, ValidationErrors};

/// Product details copied into the order when it is placed.
///
/// A snapshot, not a reference: later catalog edits do not change past orders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// Order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

/// A customer's order.
///
/// # Invariants
/// - `customer_id` is the id of the customer who placed it (never taken from the body).
/// - `items` is non-empty and every quantity is at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub items: Vec<OrderItem>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, customer_id: &UserId) -> bool {
        &self.customer_id == customer_id
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSnapshotInput {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemInput {
    #[serde(default)]
    pub product: Option<ProductSnapshotInput>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Unvalidated order body. Any `customerId` in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderInput {
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
}

impl OrderInput {
    /// Build an order for `customer_id`, reporting every invalid line.
    pub fn place(self, customer_id: UserId, placed_at: DateTime<Utc>) -> Result<Order, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut items = Vec::new();

        let inputs = self.items.unwrap_or_default();
        errors.check(inputs.is_empty(), "Items cannot be empty");

        for (n, input) in inputs.into_iter().enumerate() {
            match item_from_input(input) {
                Ok(item) => items.push(item),
                Err(messages) => {
                    for message in messages.into_messages() {
                        errors.push(format!("items[{n}]: {message}"));
                    }
                }
            }
        }
        errors.into_result()?;

        let order = Order {
            id: OrderId::new(),
            customer_id,
            items,
            placed_at,
        };
        validate(&order).into_result()?;
        Ok(order)
    }
}

fn item_from_input(input: OrderItemInput) -> Result<OrderItem, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let quantity = match input.quantity {
        None => {
            errors.push("Missing quantity");
            0
        }
        Some(q) => u32::try_from(q).ok().filter(|q| *q >= 1).unwrap_or_else(|| {
            errors.push("Quantity must be at least 1");
            0
        }),
    };

    let Some(product) = input.product else {
        errors.push("Missing product");
        return Err(errors);
    };

    let id = match product.id.as_deref() {
        None | Some("") => {
            errors.push("Missing product id");
            None
        }
        Some(raw) => raw.parse::<ProductId>().ok().or_else(|| {
            errors.push("Invalid product id");
            None
        }),
    };
    let name = product.name.map(|n| n.trim().to_string()).unwrap_or_default();
    errors.check(name.is_empty(), "Missing product name");
    errors.check(product.price.is_none(), "Missing product price");

    match (errors.into_result(), id) {
        (Ok(()), Some(id)) => Ok(OrderItem {
            product: ProductSnapshot {
                id,
                name,
                price: product.price.unwrap_or_default(),
                description: product.description,
            },
            quantity,
        }),
        (Err(errors), _) => Err(errors),
        (Ok(()), None) => Err(vec!["Missing product id".to_string()].into()),
    }
}

/// Schema rules for an order record.
pub fn validate(order: &Order) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check(order.items.is_empty(), "Items cannot be empty");

    for (n, item) in order.items.iter().enumerate() {
        errors.check(item.quantity < 1, format!("items[{n}]: Quantity must be at least 1"));
        errors.check(
            item.product.name.is_empty(),
            format!("items[{n}]: Missing product name"),
        );
        errors.check(
            !item.product.price.is_finite() || item.product.price < 0.0,
            format!("items[{n}]: Product price must not be negative"),
        );
    }

    errors
}
