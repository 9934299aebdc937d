//! BaaS Client Configuration

use std::env;

use kernel::error::app_error::{AppError, AppResult};
use url::Url;

/// Environment variable holding the service base URL
pub const BASE_URL_ENV: &str = "BAAS_URL";

/// BaaS client configuration
///
/// The base URL is the single external setting of the application and is
/// read once at startup. No request timeout is configured: a call that
/// never resolves leaves its loading flag set, which is an accepted
/// limitation of the design.
#[derive(Debug, Clone)]
pub struct BaasConfig {
    /// Base URL of the hosted service, normalized to end with `/`
    pub base_url: Url,
}

impl BaasConfig {
    /// Create a config from a base URL string
    pub fn new(base_url: &str) -> AppResult<Self> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|e| AppError::bad_request(format!("Invalid base URL: {}", e)))?;

        if url.cannot_be_a_base() {
            return Err(AppError::bad_request("Base URL must be absolute"));
        }

        // Normalize so that joining relative API paths keeps any path prefix.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { base_url: url })
    }

    /// Read the config from the environment (`BAAS_URL`)
    pub fn from_env() -> AppResult<Self> {
        let raw = env::var(BASE_URL_ENV).map_err(|_| {
            AppError::bad_request(format!("{} must be set in environment", BASE_URL_ENV))
        })?;
        Self::new(&raw)
    }

    /// Create a config for local development
    pub fn development() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:8090/").expect("static URL is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let config = BaasConfig::new("https://pb.example.com").unwrap();
        assert_eq!(config.base_url.as_str(), "https://pb.example.com/");

        let config = BaasConfig::new("https://example.com/pb").unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.com/pb/");
    }

    #[test]
    fn test_path_prefix_survives_join() {
        let config = BaasConfig::new("https://example.com/pb").unwrap();
        let joined = config.base_url.join("api/health").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/pb/api/health");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(BaasConfig::new("not a url").is_err());
        assert!(BaasConfig::new("").is_err());
    }

    #[test]
    fn test_development() {
        let config = BaasConfig::development();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8090/");
    }
}
