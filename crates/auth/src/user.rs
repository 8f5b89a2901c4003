//! User entity and its schema rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use storefront_core::{Entity, UserId, ValidationErrors};

use crate::password::{MIN_PASSWORD_LEN, PasswordError, PasswordHash};
use crate::Role;

pub const NAME_MAX_LEN: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("email pattern is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A registered user.
///
/// # Invariants
/// - `role` is one of the two known roles (parsed once, when the record is built).
/// - `password` only ever holds a one-way hash.
/// - `name` is trimmed and non-empty; `email` matched the address pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    password: PasswordHash,
}

impl User {
    pub fn new(id: UserId, name: String, email: String, role: Role, password: PasswordHash) -> Self {
        Self {
            id,
            name,
            email,
            role,
            password,
        }
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password
    }

    /// Copy of this user with a different role; everything else unchanged.
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration input
// ─────────────────────────────────────────────────────────────────────────────

/// Unvalidated user input (registration body or seed record).
///
/// Every field is optional at this stage so a payload with several missing
/// fields reports all of them instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Error)]
pub enum NewUserError {
    #[error("invalid user: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl NewUser {
    /// Check every schema rule and return all violations.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        match self.name.as_deref().map(str::trim) {
            None | Some("") => errors.push("Missing name"),
            Some(name) => errors.check(
                name.chars().count() > NAME_MAX_LEN,
                format!("Name must be at most {NAME_MAX_LEN} characters"),
            ),
        }

        match self.email.as_deref().map(str::trim) {
            None | Some("") => errors.push("Missing email"),
            Some(email) => errors.check(!EMAIL_PATTERN.is_match(email), "Invalid email"),
        }

        match self.password.as_deref() {
            None | Some("") => errors.push("Missing password"),
            Some(password) => errors.check(
                password.chars().count() < MIN_PASSWORD_LEN,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ),
        }

        if let Some(role) = self.role.as_deref() {
            errors.check(role.parse::<Role>().is_err(), "Unknown role");
        }

        errors
    }

    /// Role asked for by the input, defaulting to customer.
    pub fn requested_role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }

    /// Validate and build a [`User`] with `role`, hashing the password.
    pub fn into_user(self, role: Role) -> Result<User, NewUserError> {
        self.validate().into_result().map_err(NewUserError::Invalid)?;

        let name = self.name.unwrap_or_default().trim().to_string();
        let email = self.email.unwrap_or_default().trim().to_string();
        let password = PasswordHash::new(self.password.as_deref().unwrap_or_default())?;

        Ok(User::new(UserId::new(), name, email, role, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> NewUser {
        NewUser {
            name: Some("Ann".to_string()),
            email: Some("ann@x.com".to_string()),
            password: Some("longenough1".to_string()),
            role: None,
        }
    }

    #[test]
    fn valid_input_builds_a_user() {
        let user = ann().into_user(Role::Customer).unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.role, Role::Customer);
        assert!(user.verify_password("longenough1"));
    }

    #[test]
    fn reports_every_violation_at_once() {
        let errors = NewUser::default().validate();
        assert_eq!(
            errors.messages(),
            ["Missing name", "Missing email", "Missing password"]
        );
    }

    #[test]
    fn rejects_short_password_bad_email_and_unknown_role() {
        let input = NewUser {
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
            role: Some("root".to_string()),
            ..ann()
        };
        let errors = input.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors.messages().contains(&"Unknown role".to_string()));
    }

    #[test]
    fn email_must_be_a_whole_address_in_any_case() {
        let mixed_case = NewUser {
            email: Some("Ann.Lee@Example.COM".to_string()),
            ..ann()
        };
        assert!(mixed_case.validate().is_empty());

        let embedded = NewUser {
            email: Some("contact: ann@x.com".to_string()),
            ..ann()
        };
        assert_eq!(embedded.validate().messages(), ["Invalid email"]);
    }

    #[test]
    fn trims_name_and_limits_length() {
        let padded = NewUser {
            name: Some("   ".to_string()),
            ..ann()
        };
        assert_eq!(padded.validate().messages(), ["Missing name"]);

        let long = NewUser {
            name: Some("x".repeat(NAME_MAX_LEN + 1)),
            ..ann()
        };
        assert_eq!(long.validate().len(), 1);
    }

    #[test]
    fn requested_role_defaults_to_customer() {
        assert_eq!(ann().requested_role(), Role::Customer);
        let admin = NewUser {
            role: Some("Admin".to_string()),
            ..ann()
        };
        assert_eq!(admin.requested_role(), Role::Admin);
    }

    #[test]
    fn with_role_keeps_credentials() {
        let user = ann().into_user(Role::Customer).unwrap();
        let promoted = user.with_role(Role::Admin);
        assert_eq!(promoted.id, user.id);
        assert!(promoted.verify_password("longenough1"));
    }
}
