//! Identity Value Object
//!
//! The sign-in identity (an email address). Only trimmed non-emptiness is
//! enforced locally; format validation is the service's concern, so a
//! malformed address still reaches the remote call and gets the server's
//! rejection message.

use crate::error::{AuthError, AuthResult};

/// Trimmed, non-empty sign-in identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from raw input, trimming surrounding whitespace
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AuthError::EmptyIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
