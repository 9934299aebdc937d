//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, gateway traits
//! - `application/` - The auth flow state machine
//! - `infra/` - BaaS-backed gateway implementation
//!
//! ## Features
//! - Password sign-in and account creation against the hosted service
//! - One-time-code step-up (MFA) when the service demands it
//! - Session mirroring from the client auth store, including externally
//!   driven invalidation
//!
//! ## Security Model
//! - All credential verification, hashing, and token issuance happen on
//!   the remote service; this crate never handles secrets beyond passing
//!   user input through one request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::flow::{AuthFlow, AuthStep};
pub use error::{AuthError, AuthResult};
pub use infra::baas::BaasAuthGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod gateway {
    pub use crate::domain::gateway::*;
}
