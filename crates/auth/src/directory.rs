use std::sync::Arc;

use thiserror::Error;

use storefront_core::UserId;

use crate::{Credentials, User};

/// The backing storage could not answer a lookup.
///
/// Never used for a miss: an unknown user is `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("user directory unavailable: {0}")]
pub struct DirectoryError(pub String);

/// Read access to registered users.
///
/// Implementations own their synchronisation; callers never lock.
pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;

    /// The user owning `credentials`, or `None` when the email is unknown or
    /// the password does not verify. Both misses look the same to the caller.
    fn find_by_credentials(&self, credentials: &Credentials) -> Result<Option<User>, DirectoryError> {
        let Some(user) = self.find_by_email(credentials.email())? else {
            return Ok(None);
        };
        Ok(user.verify_password(credentials.password()).then_some(user))
    }
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        (**self).find_by_id(id)
    }

    fn find_by_credentials(&self, credentials: &Credentials) -> Result<Option<User>, DirectoryError> {
        (**self).find_by_credentials(credentials)
    }
}
