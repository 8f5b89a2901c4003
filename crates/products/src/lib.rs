//! Products domain module.
//!
//! This crate contains the catalog entity and its schema rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductInput, validate};
