//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are 24 lowercase hex characters, time-ordered (the first twelve
//! bytes of a UUIDv7). Any string made of `[0-9a-z]` with a length between 8
//! and 24 is accepted when parsing, which is also the shape the HTTP router
//! recognises as an id path segment.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Shortest identifier accepted from the outside world.
pub const MIN_ID_LEN: usize = 8;
/// Longest identifier accepted from the outside world.
pub const MAX_ID_LEN: usize = 24;

/// Identifier of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

/// Whether `s` has the shape of an identifier (`[0-9a-z]{8,24}`).
pub fn is_id_shaped(s: &str) -> bool {
    (MIN_ID_LEN..=MAX_ID_LEN).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

fn generate() -> String {
    let uuid = Uuid::now_v7();
    uuid.as_bytes()[..MAX_ID_LEN / 2]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

macro_rules! impl_string_id {
    ($t:ident, $name:literal) => {
        impl $t {
            /// Create a fresh identifier.
            pub fn new() -> Self {
                Self(generate())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_id_shaped(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(DomainError::invalid_id(format!("{}: {:?}", $name, s)))
                }
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if is_id_shaped(&value) {
                    Ok(Self(value))
                } else {
                    Err(DomainError::invalid_id(format!("{}: {:?}", $name, value)))
                }
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

impl_string_id!(UserId, "UserId");
impl_string_id!(ProductId, "ProductId");
impl_string_id!(OrderId, "OrderId");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_ids_are_id_shaped_and_distinct() {
        let a = UserId::new();
        let b = UserId::new();
        assert_eq!(a.as_str().len(), MAX_ID_LEN);
        assert!(is_id_shaped(a.as_str()));
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_uppercase_and_short_ids() {
        assert!("ABCDEFGH".parse::<ProductId>().is_err());
        assert!("abc1234".parse::<ProductId>().is_err());
        assert!("a".repeat(25).parse::<ProductId>().is_err());
        assert!("abc12345".parse::<ProductId>().is_ok());
    }

    #[test]
    fn serde_rejects_malformed_ids() {
        let ok: Result<OrderId, _> = serde_json::from_str("\"0123456789abcdef01234567\"");
        assert!(ok.is_ok());
        let bad: Result<OrderId, _> = serde_json::from_str("\"not an id\"");
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn every_id_shaped_string_parses(s in "[0-9a-z]{8,24}") {
            let id: UserId = s.parse().unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
