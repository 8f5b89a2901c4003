//! Request authentication: `Authorization` header → user or anonymous.

use crate::{AuthenticatedUser, Credentials, DirectoryError, UserDirectory};

/// Resolves the caller of a request from its Basic credentials.
///
/// - No sessions: every call hits the directory.
/// - Absent, malformed, unknown and wrong credentials all resolve to
///   `Ok(None)`, so a caller cannot tell which one it was.
/// - Only a failing directory is an error.
#[derive(Debug, Clone)]
pub struct Authenticator<D> {
    directory: D,
}

impl<D: UserDirectory> Authenticator<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolve the raw `Authorization` header value to a user.
    pub fn resolve(&self, authorization: Option<&str>) -> Result<Option<AuthenticatedUser>, DirectoryError> {
        let credentials = match Credentials::from_header(authorization) {
            Ok(credentials) => credentials,
            Err(reason) => {
                tracing::debug!(%reason, "request is anonymous");
                return Ok(None);
            }
        };

        match self.directory.find_by_credentials(&credentials)? {
            Some(user) => {
                tracing::debug!(user_id = %user.id, role = %user.role, "request authenticated");
                Ok(Some(AuthenticatedUser::from(&user)))
            }
            None => {
                tracing::debug!("credentials rejected");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewUser, Role, User};
    use storefront_core::UserId;

    struct VecDirectory(Vec<User>);

    impl UserDirectory for VecDirectory {
        fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
            Ok(self.0.iter().find(|u| u.email == email).cloned())
        }

        fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
            Ok(self.0.iter().find(|u| &u.id == id).cloned())
        }
    }

    struct DownDirectory;

    impl UserDirectory for DownDirectory {
        fn find_by_email(&self, _email: &str) -> Result<Option<User>, DirectoryError> {
            Err(DirectoryError("connection refused".to_string()))
        }

        fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, DirectoryError> {
            Err(DirectoryError("connection refused".to_string()))
        }
    }

    fn user(email: &str, password: &str, role: Role) -> User {
        NewUser {
            name: Some("Test".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            role: None,
        }
        .into_user(role)
        .unwrap()
    }

    fn authenticator() -> Authenticator<VecDirectory> {
        Authenticator::new(VecDirectory(vec![
            user("admin@email.com", "1234567890", Role::Admin),
            user("customer@email.com", "0987654321", Role::Customer),
        ]))
    }

    #[test]
    fn resolves_matching_credentials() {
        let header = Credentials::new("admin@email.com", "1234567890").to_header();
        let resolved = authenticator().resolve(Some(&header)).unwrap().unwrap();
        assert_eq!(resolved.email, "admin@email.com");
        assert_eq!(resolved.role, Role::Admin);
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let auth = authenticator();
        let wrong_password = Credentials::new("admin@email.com", "nope-nope-nope").to_header();
        let unknown_email = Credentials::new("ghost@email.com", "1234567890").to_header();

        assert_eq!(auth.resolve(Some(&wrong_password)), Ok(None));
        assert_eq!(auth.resolve(Some(&unknown_email)), Ok(None));
    }

    #[test]
    fn malformed_headers_are_anonymous() {
        let auth = authenticator();
        assert_eq!(auth.resolve(None), Ok(None));
        assert_eq!(auth.resolve(Some("Basic %%%")), Ok(None));
        assert_eq!(auth.resolve(Some("Bearer token")), Ok(None));
    }

    #[test]
    fn directory_failure_is_an_error_not_anonymous() {
        let auth = Authenticator::new(DownDirectory);
        let header = Credentials::new("admin@email.com", "1234567890").to_header();
        assert!(auth.resolve(Some(&header)).is_err());

        // Malformed headers never reach the directory.
        assert_eq!(auth.resolve(Some("Bearer token")), Ok(None));
    }
}
