//! `storefront-auth` — authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it sees the raw
//! `Authorization` header value and a [`UserDirectory`], nothing else.

pub mod authenticate;
pub mod credentials;
pub mod directory;
pub mod password;
pub mod principal;
pub mod roles;
pub mod user;

pub use authenticate::Authenticator;
pub use credentials::{CredentialError, Credentials};
pub use directory::{DirectoryError, UserDirectory};
pub use password::{PasswordError, PasswordHash};
pub use principal::AuthenticatedUser;
pub use roles::{Role, UnknownRole};
pub use user::{NewUser, NewUserError, User};
