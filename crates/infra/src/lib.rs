//! Infrastructure layer: storage collaborators and bootstrap data.

pub mod directory;
pub mod seed;
pub mod store;

pub use directory::StoreUserDirectory;
pub use seed::{SeedData, SeedError, SeedReport};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError, Stores};
