//! Gateway Traits
//!
//! Capability interfaces over the remote service. Implementation is in
//! the infrastructure layer; tests substitute in-memory fakes.

use tokio::sync::watch;

use crate::domain::entity::session::Session;
use crate::domain::value_object::{identity::Identity, otp_code::OtpCode};
use crate::error::AuthResult;
use kernel::id::{MfaChallengeId, OtpRequestId};

/// Remote authentication operations
///
/// Successful authentication calls also persist the session into the
/// underlying auth store, so [`SessionStore`] watchers observe it.
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Authenticate with identity and password
    ///
    /// A rejection that demands a second factor surfaces as
    /// [`crate::AuthError::MfaRequired`] carrying the step-up identifier;
    /// every other rejection is the plain remote error.
    async fn authenticate_with_password(
        &self,
        identity: &Identity,
        password: &str,
    ) -> AuthResult<Session>;

    /// Create an account; does not establish a session
    async fn create_account(
        &self,
        identity: &Identity,
        password: &str,
        password_confirm: &str,
    ) -> AuthResult<()>;

    /// Request a one-time code for the identity
    ///
    /// Returns the request identifier to pass to verification.
    async fn request_otp(&self, identity: &Identity) -> AuthResult<OtpRequestId>;

    /// Complete a step-up with a received code
    async fn authenticate_with_otp(
        &self,
        request: &OtpRequestId,
        code: &OtpCode,
        challenge: &MfaChallengeId,
    ) -> AuthResult<Session>;
}

/// Session store capability
///
/// Mirrors the client auth store: current identity or none, explicit
/// clear (sign-out), and change notification covering both flow-driven
/// and externally-driven transitions (e.g. token invalidation).
pub trait SessionStore {
    /// Currently stored session, if any
    fn current(&self) -> Option<Session>;

    /// Discard the stored session, notifying watchers
    fn clear(&self);

    /// Watch session changes
    ///
    /// Dropping the receiver ends that subscription; the store side is
    /// released when the implementing gateway is dropped.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
