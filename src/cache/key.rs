//! Key Validation
//!
//! Every key must be non-empty, at most `MAX_KEY_LENGTH` characters, and
//! drawn from `[a-zA-Z0-9_\-:.]`.

use std::fmt;

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{Result, StoreError};

/// Why a key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyViolation {
    /// Key is the empty string
    Empty,
    /// Key is longer than `MAX_KEY_LENGTH` characters
    TooLong { length: usize },
    /// Key contains a character outside the permitted class
    IllegalCharacter { character: char, position: usize },
}

impl fmt::Display for KeyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyViolation::Empty => write!(f, "key must not be empty"),
            KeyViolation::TooLong { length } => write!(
                f,
                "key is {} characters, maximum is {}",
                length, MAX_KEY_LENGTH
            ),
            KeyViolation::IllegalCharacter {
                character,
                position,
            } => write!(
                f,
                "illegal character {:?} at position {} (allowed: letters, digits, '_', '-', ':', '.')",
                character, position
            ),
        }
    }
}

/// Checks a key against the format constraint.
///
/// Returns `StoreError::InvalidKey` naming the key and the first violation found.
pub fn validate_key(key: &str) -> Result<()> {
    match find_violation(key) {
        None => Ok(()),
        Some(reason) => Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason,
        }),
    }
}

fn find_violation(key: &str) -> Option<KeyViolation> {
    if key.is_empty() {
        return Some(KeyViolation::Empty);
    }

    let length = key.chars().count();
    if length > MAX_KEY_LENGTH {
        return Some(KeyViolation::TooLong { length });
    }

    key.chars()
        .enumerate()
        .find(|(_, c)| !is_key_char(*c))
        .map(|(position, character)| KeyViolation::IllegalCharacter {
            character,
            position,
        })
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
}
