//! Initial data loading (users and products) from a JSON document.
//!
//! ```json
//! {
//!   "users": [{ "name": "Admin", "email": "admin@email.com", "password": "1234567890", "role": "admin" }],
//!   "products": [{ "name": "Chair", "price": 12.5, "description": "wooden" }]
//! }
//! ```
//!
//! Passwords are plaintext in the document and hashed on load.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use storefront_auth::{NewUser, NewUserError};
use storefront_core::ValidationErrors;
use storefront_products::ProductInput;

use crate::store::{StoreError, Stores};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub products: Vec<ProductInput>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub products: usize,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{collection}[{index}] is invalid: {errors}")]
    Invalid {
        collection: &'static str,
        index: usize,
        errors: ValidationErrors,
    },

    #[error("users[{index}]: email {email} is already in use")]
    DuplicateEmail { index: usize, email: String },

    #[error("users[{index}]: {source}")]
    Password {
        index: usize,
        source: storefront_auth::PasswordError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SeedData {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validate every record, then write them all.
    ///
    /// Nothing is written when any record is invalid.
    pub fn apply(self, stores: &Stores) -> Result<SeedReport, SeedError> {
        let mut existing_emails: Vec<String> = stores
            .users
            .list()?
            .into_iter()
            .map(|u| u.email)
            .collect();

        let mut users = Vec::with_capacity(self.users.len());
        for (index, input) in self.users.into_iter().enumerate() {
            let role = input.requested_role();
            let user = input.into_user(role).map_err(|e| match e {
                NewUserError::Invalid(errors) => SeedError::Invalid {
                    collection: "users",
                    index,
                    errors,
                },
                NewUserError::Password(source) => SeedError::Password { index, source },
            })?;
            if existing_emails.contains(&user.email) {
                return Err(SeedError::DuplicateEmail {
                    index,
                    email: user.email,
                });
            }
            existing_emails.push(user.email.clone());
            users.push(user);
        }

        let mut products = Vec::with_capacity(self.products.len());
        for (index, input) in self.products.into_iter().enumerate() {
            let product = input.into_product().map_err(|errors| SeedError::Invalid {
                collection: "products",
                index,
                errors,
            })?;
            products.push(product);
        }

        let report = SeedReport {
            users: users.len(),
            products: products.len(),
        };
        for user in users {
            stores.users.save(user)?;
        }
        for product in products {
            stores.products.save(product)?;
        }

        tracing::info!(users = report.users, products = report.products, "seed data loaded");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_auth::Role;

    fn seed(json: serde_json::Value) -> SeedData {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn loads_users_with_hashed_passwords_and_roles() {
        let stores = Stores::in_memory();
        let report = seed(serde_json::json!({
            "users": [
                { "name": "Admin", "email": "admin@email.com", "password": "1234567890", "role": "Admin" },
                { "name": "Customer", "email": "customer@email.com", "password": "0987654321" }
            ],
            "products": [{ "name": "Chair", "price": 12.5 }]
        }))
        .apply(&stores)
        .unwrap();

        assert_eq!(report, SeedReport { users: 2, products: 1 });
        let users = stores.users.list().unwrap();
        let admin = users.iter().find(|u| u.email == "admin@email.com").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.verify_password("1234567890"));
        assert_ne!(admin.password_hash().as_str(), "1234567890");
    }

    #[test]
    fn invalid_record_writes_nothing() {
        let stores = Stores::in_memory();
        let err = seed(serde_json::json!({
            "users": [
                { "name": "Ok", "email": "ok@email.com", "password": "1234567890" },
                { "name": "Bad", "email": "bad", "password": "short" }
            ]
        }))
        .apply(&stores)
        .unwrap_err();

        assert!(matches!(err, SeedError::Invalid { collection: "users", index: 1, .. }));
        assert!(stores.users.list().unwrap().is_empty());
    }

    #[test]
    fn duplicate_emails_are_rejected() {
        let stores = Stores::in_memory();
        let err = seed(serde_json::json!({
            "users": [
                { "name": "A", "email": "same@email.com", "password": "1234567890" },
                { "name": "B", "email": "same@email.com", "password": "1234567890" }
            ]
        }))
        .apply(&stores)
        .unwrap_err();

        assert!(matches!(err, SeedError::DuplicateEmail { index: 1, .. }));
    }
}
