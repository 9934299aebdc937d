//! Common ID Types
//!
//! Type-safe wrappers for server-issued record identifiers.
//! The BaaS mints record ids as compact opaque strings, so the wrapper
//! stores the string verbatim and only enforces shape at the boundary.

use std::fmt;
use std::marker::PhantomData;

use nid::Nanoid;
use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound = "", transparent)]
pub struct Id<T> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Generate a fresh nanoid-style ID
    ///
    /// Record ids are normally minted by the server; this exists for
    /// in-memory fakes and tests.
    pub fn random() -> Self {
        Self::from_raw(Nanoid::<15>::new().to_string())
    }

    /// Wrap a value that is already known to be a record id
    /// (e.g. taken from a decoded server response).
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Parse an id from untrusted input
    pub fn parse_str(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Record id cannot be empty"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::bad_request("Record id cannot contain whitespace"));
        }
        Ok(Self::from_raw(trimmed))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Convert into the underlying string
    pub fn into_string(self) -> String {
        self.value
    }
}

// Manual impls: derives would demand bounds on the phantom marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> std::str::FromStr for Id<T> {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Id::parse_str(s)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user record IDs
    pub struct User;

    /// Marker for todo record IDs
    pub struct Todo;

    /// Marker for MFA step-up challenge IDs
    pub struct MfaChallenge;

    /// Marker for one-time-code request IDs
    pub struct OtpRequest;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type TodoId = Id<markers::Todo>;
pub type MfaChallengeId = Id<markers::MfaChallenge>;
pub type OtpRequestId = Id<markers::OtpRequest>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_id: UserId = Id::random();
        let todo_id: TodoId = Id::random();

        // These are different types, cannot be mixed
        let _u: String = user_id.into_string();
        let _t: String = todo_id.into_string();
    }

    #[test]
    fn test_random_id_shape() {
        let id: TodoId = Id::random();
        assert_eq!(id.as_str().len(), 15);
    }

    #[test]
    fn test_parse_str() {
        let id: UserId = Id::parse_str("  u1a2b3c4d5e6f7 ").unwrap();
        assert_eq!(id.as_str(), "u1a2b3c4d5e6f7");

        assert!(UserId::parse_str("").is_err());
        assert!(UserId::parse_str("   ").is_err());
        assert!(UserId::parse_str("has space").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: TodoId = Id::from_raw("abc123def456ghi");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc123def456ghi""#);

        let back: TodoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
