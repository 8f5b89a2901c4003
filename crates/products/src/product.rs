use serde::Deserialize;

use storefront_core::{Entity, ProductId, ValidationErrors};

pub const NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, always rounded to two decimals.
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Apply the fields present in `patch`, then re-check the whole record.
    pub fn patched(&self, patch: ProductInput) -> Result<Product, ValidationErrors> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if patch.image.is_some() {
            next.image = patch.image;
        }
        if patch.description.is_some() {
            next.description = patch.description;
        }
        let next = normalize(next);
        validate(&next).into_result()?;
        Ok(next)
    }
}

/// Unvalidated product fields (create body, update body or seed record).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductInput {
    /// Build a new product; every violated rule is reported.
    pub fn into_product(self) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.name.is_none(), "Missing name");
        errors.check(self.price.is_none(), "Missing price");
        errors.into_result()?;

        let product = normalize(Product {
            id: ProductId::new(),
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            image: self.image,
            description: self.description,
        });
        validate(&product).into_result()?;
        Ok(product)
    }
}

/// Schema rules for a product record.
pub fn validate(product: &Product) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name_len = product.name.chars().count();
    errors.check(name_len == 0, "Missing name");
    errors.check(
        name_len > NAME_MAX_LEN,
        format!("Name must be at most {NAME_MAX_LEN} characters"),
    );

    errors.check(!product.price.is_finite(), "Price must be a number");
    errors.check(product.price < 0.0, "Price must not be negative");

    if let Some(description) = &product.description {
        let len = description.chars().count();
        errors.check(len == 0, "Description must not be empty");
        errors.check(
            len > DESCRIPTION_MAX_LEN,
            format!("Description must be at most {DESCRIPTION_MAX_LEN} characters"),
        );
    }

    if let Some(image) = &product.image {
        errors.check(image.trim().is_empty(), "Image must not be empty");
    }

    errors
}

fn normalize(mut product: Product) -> Product {
    product.name = product.name.trim().to_string();
    product.description = product.description.map(|d| d.trim().to_string());
    if product.price.is_finite() {
        product.price = (product.price * 100.0).round() / 100.0;
    }
    product
}
