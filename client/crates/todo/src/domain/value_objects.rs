//! Value Objects

use crate::error::{TodoError, TodoResult};

/// Trimmed, non-empty todo title
///
/// Length and content rules belong to the service; the client only
/// refuses to send blank titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// Create a title from raw input, trimming surrounding whitespace
    pub fn new(input: impl AsRef<str>) -> TodoResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a value from a decoded server record (assumed already valid)
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the title as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trims() {
        let title = Title::new("  Buy milk  ").unwrap();
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn test_title_rejects_blank() {
        assert!(matches!(Title::new(""), Err(TodoError::EmptyTitle)));
        assert!(matches!(Title::new("   "), Err(TodoError::EmptyTitle)));
        assert!(matches!(Title::new("\t\n"), Err(TodoError::EmptyTitle)));
    }

    #[test]
    fn test_from_raw_keeps_server_value() {
        // Server data is not revalidated on the way in.
        let title = Title::from_raw("");
        assert_eq!(title.as_str(), "");
    }
}
