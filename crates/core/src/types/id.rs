//! Newtype IDs for type-safe entity references.
//!
//! Product IDs are opaque strings supplied by the catalog (and echoed back by
//! clients), so they are validated syntactically on the way in. Task IDs are
//! generated locally and never parsed from untrusted input except in routes.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("product id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A product identifier such as `p1`.
///
/// ## Constraints
///
/// - Length: 1-64 bytes
/// - Characters: ASCII letters, digits, `-` and `_`
///
/// A valid `ProductId` is not required to exist in the catalog; carts may
/// hold ids the current catalog no longer knows about.
///
/// ## Examples
///
/// ```
/// use mini_shop_core::ProductId;
///
/// assert!(ProductId::parse("p1").is_ok());
/// assert!(ProductId::parse("tote-bag_02").is_ok());
///
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("p 1").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product id.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 bytes, or
    /// contains anything other than ASCII alphanumerics, `-` or `_`.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(IdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(IdError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a to-do list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh random task id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_product_ids() {
        assert!(ProductId::parse("p1").is_ok());
        assert!(ProductId::parse("P12").is_ok());
        assert!(ProductId::parse("canvas-tote").is_ok());
        assert!(ProductId::parse("mug_02").is_ok());
        assert!(ProductId::parse(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            ProductId::parse(&"a".repeat(65)),
            Err(IdError::TooLong { max: 64 })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            ProductId::parse("p 1"),
            Err(IdError::InvalidCharacter(' '))
        );
        assert_eq!(
            ProductId::parse("p1/../x"),
            Err(IdError::InvalidCharacter('/'))
        );
        assert_eq!(
            ProductId::parse("<script>"),
            Err(IdError::InvalidCharacter('<'))
        );
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let ok: ProductId = serde_json::from_str("\"p3\"").unwrap();
        assert_eq!(ok.as_str(), "p3");

        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
        assert!(serde_json::from_str::<ProductId>("\"a b\"").is_err());
    }

    #[test]
    fn test_task_id_from_str() {
        let id = TaskId::new();
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<TaskId>().is_err());
    }
}
