use serde::Serialize;

use storefront_core::UserId;

use crate::{Role, User};

/// Identity of the caller of one request, resolved from Basic credentials.
///
/// Rebuilt for every request from the current user record; never cached, so a
/// role change or deletion takes effect on the very next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
