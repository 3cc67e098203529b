//! Client-supplied cart identifier.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`CartId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartIdError {
    /// The input string is empty.
    #[error("cart id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("cart id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("cart id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Identifier of a cart.
///
/// Cart ids double as directory names on disk, so they are restricted to
/// ASCII letters, digits, `-` and `_`.
///
/// ## Examples
///
/// ```
/// use webshop_storefront::models::CartId;
///
/// assert!(CartId::parse("4f1c2a9e").is_ok());
/// assert!(CartId::parse("").is_err());
/// assert!(CartId::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    /// Maximum length of a cart id.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `CartId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters, or
    /// contains characters other than ASCII letters, digits, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, CartIdError> {
        if s.is_empty() {
            return Err(CartIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(CartIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CartIdError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh random cart id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the cart id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CartId {
    type Err = CartIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CartId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
