//! Application Configuration

/// Todo list configuration
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// Collection name on the service
    pub collection: String,
    /// Bounded full-list fetch size
    pub list_limit: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            collection: "todos".to_string(),
            list_limit: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TodoConfig::default();
        assert_eq!(config.collection, "todos");
        assert_eq!(config.list_limit, 200);
    }
}
