//! One-way password storage.

use thiserror::Error;

/// Minimum accepted plaintext length.
pub const MIN_PASSWORD_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// bcrypt hash of a user's password. The plaintext is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `plaintext` with a fresh salt.
    pub fn new(plaintext: &str) -> Result<Self, PasswordError> {
        Ok(Self(bcrypt::hash(plaintext, cost())?))
    }

    /// Wrap an existing bcrypt hash (e.g. read back from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Constant-time comparison via bcrypt; a corrupt hash never verifies.
    pub fn verify(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.0).unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

// Lower cost factor in debug builds keeps tests fast.
fn cost() -> u32 {
    if cfg!(debug_assertions) { 4 } else { bcrypt::DEFAULT_COST }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_plaintext() {
        let hash = PasswordHash::new("longenough1").unwrap();
        assert_ne!(hash.as_str(), "longenough1");
        assert!(hash.verify("longenough1"));
        assert!(!hash.verify("longenough2"));
    }

    #[test]
    fn corrupt_hash_never_verifies() {
        let hash = PasswordHash::from_hash("not-a-bcrypt-hash");
        assert!(!hash.verify("not-a-bcrypt-hash"));
    }
}
