//! One-Time Code Value Object

use crate::error::{AuthError, AuthResult};

/// Trimmed, non-empty one-time code as typed by the user
///
/// The service decides validity; no length or charset rule is applied
/// locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Create a code from raw input, trimming surrounding whitespace
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AuthError::EmptyOtpCode);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_trims() {
        let code = OtpCode::new(" 123456 ").unwrap();
        assert_eq!(code.as_str(), "123456");
    }

    #[test]
    fn test_code_rejects_empty() {
        assert!(matches!(OtpCode::new(""), Err(AuthError::EmptyOtpCode)));
        assert!(matches!(OtpCode::new("  "), Err(AuthError::EmptyOtpCode)));
    }
}
