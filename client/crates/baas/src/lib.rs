//! BaaS Client Plumbing
//!
//! Technical foundations for talking to the hosted backend-as-a-service:
//! - HTTP client with bearer-token injection and wire error decoding
//! - Persistent auth state store with change-notification observers
//! - Collection-scoped record access (list/create/update/delete)
//! - Wire codecs (timestamps, filter expressions)
//!
//! All durability, querying, and authentication cryptography live on the
//! remote service; this crate only issues HTTP calls and decodes results.

pub mod auth_state;
pub mod client;
pub mod config;
pub mod datetime;
pub mod error;
pub mod records;

// Re-exports for convenience
pub use auth_state::{AuthModel, AuthState, SubscriptionId};
pub use client::BaasClient;
pub use config::BaasConfig;
pub use error::Error;
pub use records::{ListQuery, RecordService, filter_eq};

// Consumers name HTTP methods when calling [`BaasClient::send`] directly;
// re-exported so they do not need their own reqwest dependency.
pub use reqwest::Method;
