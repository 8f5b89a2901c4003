//! HTTP Basic credential extraction.
//!
//! Only the header *value* is handled here; callers pass whatever the transport
//! saw (or `None` when the header was absent).

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// The only supported authentication scheme (matched case-sensitively).
pub const BASIC_SCHEME: &str = "Basic";

/// Email/password pair decoded from an `Authorization: Basic ...` header.
///
/// Transient: built per request and dropped when the request completes.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse an `Authorization` header value.
    ///
    /// The scheme is the text before the first space and must be exactly
    /// `Basic`. The remainder must be canonical standard base64 of UTF-8 text
    /// containing a `:`; the text is split on the first `:` only, so passwords
    /// may themselves contain colons.
    pub fn from_header(header: Option<&str>) -> Result<Self, CredentialError> {
        let header = header.filter(|h| !h.is_empty()).ok_or(CredentialError::Missing)?;

        let (scheme, encoded) = header.split_once(' ').unwrap_or((header, ""));
        if scheme != BASIC_SCHEME {
            return Err(CredentialError::UnsupportedScheme);
        }

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| CredentialError::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::InvalidEncoding)?;

        let (email, password) = decoded
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;

        Ok(Self::new(email, password))
    }

    /// Render as an `Authorization` header value.
    pub fn to_header(&self) -> String {
        let raw = format!("{}:{}", self.email, self.password);
        format!("{BASIC_SCHEME} {}", STANDARD.encode(raw))
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Why a header could not be turned into [`Credentials`].
///
/// Callers outside this crate should treat every variant the same way as an
/// absent header; the distinction only exists for logging.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("authorization header missing or empty")]
    Missing,

    #[error("authorization scheme is not Basic")]
    UnsupportedScheme,

    #[error("credentials are not valid base64 text")]
    InvalidEncoding,

    #[error("decoded credentials have no ':' separator")]
    MissingSeparator,
}

/// `Credentials` or nothing: the contract the authenticator consumes.
pub fn extract(header: Option<&str>) -> Option<Credentials> {
    Credentials::from_header(header).ok()
}
