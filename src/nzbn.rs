//! New Zealand Business Number identifier.
//!
//! An [`Nzbn`] can only be obtained through validation, so anything holding
//! one is guaranteed to carry exactly 13 ASCII digits. Functions that talk to
//! the register take `&Nzbn` rather than `&str`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in an NZBN.
pub const NZBN_LENGTH: usize = 13;

/// Rejection produced when a candidate identifier is malformed.
///
/// This is distinct from any fault raised while talking to the register:
/// it is always detected before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NzbnError {
    /// The trimmed input does not have exactly 13 characters.
    #[error("NZBN must be exactly 13 digits, got {length} characters")]
    InvalidLength {
        /// Character count of the trimmed input.
        length: usize,
    },

    /// The trimmed input contains something other than an ASCII digit.
    #[error("NZBN must contain only digits 0-9, found '{character}' at position {position}")]
    InvalidCharacter {
        /// The first offending character.
        character: char,
        /// Zero-based character position within the trimmed input.
        position: usize,
    },
}

/// A validated 13-digit New Zealand Business Number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nzbn(String);

impl Nzbn {
    /// Validate a candidate identifier.
    ///
    /// Surrounding whitespace is trimmed first. The remainder must be exactly
    /// 13 ASCII digits: no sign, no separators, no other numeral systems.
    pub fn parse(input: &str) -> Result<Self, NzbnError> {
        let trimmed = input.trim();

        let length = trimmed.chars().count();
        if length != NZBN_LENGTH {
            return Err(NzbnError::InvalidLength { length });
        }

        if let Some((position, character)) = trimmed
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(NzbnError::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nzbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nzbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Nzbn {
    type Err = NzbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Nzbn {
    type Error = NzbnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Nzbn> for String {
    fn from(nzbn: Nzbn) -> Self {
        nzbn.0
    }
}
