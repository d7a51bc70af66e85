//! DNS-style labels
//!
//! The scoring functions accept any string, but the tables are curated for
//! the label alphabet of RFC 1035 section 2.3.1. [`Label`] validates input
//! at the boundary of the screening API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters allowed in a label, in lower case.
pub const LABEL_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789-";

/// Maximum label length in characters.
pub const MAX_LABEL_LENGTH: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,

    #[error("label is {len} characters long, maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// How strictly [`Label::parse`] checks its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Only `[A-Za-z0-9-]` is accepted.
    #[default]
    Strict,
    /// Any characters; only emptiness and length are checked.
    Lenient,
}

/// A validated, lower-cased label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Validate `s` and store it lower-cased.
    ///
    /// # Errors
    /// Returns [`LabelError`] if `s` is empty, longer than
    /// [`MAX_LABEL_LENGTH`] characters or, in strict mode, contains a
    /// character outside the label alphabet.
    pub fn parse(s: &str, mode: ValidationMode) -> Result<Self, LabelError> {
        let len = s.chars().count();
        if len == 0 {
            return Err(LabelError::Empty);
        }
        if len > MAX_LABEL_LENGTH {
            return Err(LabelError::TooLong {
                len,
                max: MAX_LABEL_LENGTH,
            });
        }
        if mode == ValidationMode::Strict {
            if let Some((position, ch)) = s
                .chars()
                .enumerate()
                .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '-'))
            {
                return Err(LabelError::InvalidCharacter { ch, position });
            }
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Labels are never empty; provided for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ValidationMode::Strict)
    }
}

impl TryFrom<String> for Label {
    type Error = LabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s, ValidationMode::Strict)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
