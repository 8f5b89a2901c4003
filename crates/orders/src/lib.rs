//! Orders domain module.
//!
//! This crate contains customer orders and their schema rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{Order, OrderInput, OrderItem, OrderItemInput, ProductSnapshot, ProductSnapshotInput, validate};
