use std::sync::Arc;

use storefront_auth::{DirectoryError, User, UserDirectory};
use storefront_core::UserId;

use crate::store::{DocumentStore, StoreError};

/// [`UserDirectory`] backed by the users document collection.
///
/// Storage failures are logged and returned as [`DirectoryError`]; they are
/// never reported as a miss.
#[derive(Clone)]
pub struct StoreUserDirectory {
    users: Arc<dyn DocumentStore<User>>,
}

impl StoreUserDirectory {
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    /// Whether any user already has `email`.
    pub fn email_in_use(&self, email: &str) -> Result<bool, DirectoryError> {
        Ok(self.find_by_email(email)?.is_some())
    }
}

impl core::fmt::Debug for StoreUserDirectory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreUserDirectory").finish_non_exhaustive()
    }
}

impl UserDirectory for StoreUserDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        let users = self.users.list().map_err(|e| unavailable("email", e))?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        self.users.find(id).map_err(|e| unavailable("id", e))
    }
}

fn unavailable(lookup: &'static str, err: StoreError) -> DirectoryError {
    tracing::error!(error = %err, lookup, "user lookup failed");
    DirectoryError(err.to_string())
}
