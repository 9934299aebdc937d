//! Auth Flow State Machine
//!
//! Drives sign-in, sign-up, and the one-time-code step-up against the
//! gateway, and owns every piece of transient auth UI state: inputs,
//! loading flags, messages, and the pending challenge. One instance per
//! process scope, single logical thread; each operation suspends at its
//! remote call and applies the outcome on resume.

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::messages;
use crate::domain::entity::{challenge::PendingChallenge, session::Session};
use crate::domain::gateway::{AuthGateway, SessionStore};
use crate::domain::value_object::{identity::Identity, otp_code::OtpCode};
use crate::error::AuthError;

/// Which auth screen the flow is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AuthStep {
    #[display("login")]
    Login,
    #[display("register")]
    Register,
    #[display("mfa-pending")]
    MfaPending,
}

/// Auth flow controller
///
/// Input fields are public because the front-end writes them directly,
/// like form state; everything else changes only through operations so
/// the step/challenge invariants hold.
pub struct AuthFlow<G>
where
    G: AuthGateway + SessionStore,
{
    gateway: Arc<G>,
    session_rx: watch::Receiver<Option<Session>>,
    session: Option<Session>,
    step: AuthStep,
    challenge: Option<PendingChallenge>,
    loading: bool,
    otp_loading: bool,
    error: Option<String>,
    info: Option<String>,

    /// Identity (email) input
    pub email: String,
    /// Password input
    pub password: String,
    /// Password confirmation input (register only)
    pub password_confirm: String,
    /// One-time code input (step-up only)
    pub otp_code: String,
}

impl<G> AuthFlow<G>
where
    G: AuthGateway + SessionStore,
{
    pub fn new(gateway: Arc<G>) -> Self {
        let session_rx = gateway.subscribe();
        let session = gateway.current();

        Self {
            gateway,
            session_rx,
            session,
            step: AuthStep::Login,
            challenge: None,
            loading: false,
            otp_loading: false,
            error: None,
            info: None,
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            otp_code: String::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn challenge(&self) -> Option<&PendingChallenge> {
        self.challenge.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_otp_loading(&self) -> bool {
        self.otp_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Sign in with the current identity and password inputs
    ///
    /// A rejection carrying a step-up identifier moves the flow to
    /// [`AuthStep::MfaPending`] and requests a one-time code for the
    /// submitted identity; any other rejection stays on the sign-in
    /// screen with the server's message.
    pub async fn sign_in(&mut self) {
        let trimmed = self.email.trim().to_string();
        self.email = trimmed.clone();

        let identity = match Identity::new(&trimmed) {
            Ok(identity) => identity,
            Err(err) => {
                err.log();
                self.error = Some(messages::EMAIL_REQUIRED.to_string());
                return;
            }
        };

        self.error = None;
        self.info = None;
        self.loading = true;

        let gateway = Arc::clone(&self.gateway);
        let password = self.password.clone();
        let result = gateway.authenticate_with_password(&identity, &password).await;

        match result {
            Ok(session) => {
                tracing::info!(user = %session.user_id, "Signed in with password");
                self.session = Some(session);
                self.finish_authenticated();
            }
            Err(AuthError::MfaRequired(mfa_id)) => {
                tracing::info!(challenge = %mfa_id, "Sign-in requires a one-time code");
                self.challenge = Some(PendingChallenge::new(mfa_id, trimmed.clone()));
                self.step = AuthStep::MfaPending;
                self.password.clear();
                self.password_confirm.clear();
                self.request_code(&trimmed).await;
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::SIGN_IN_FAILED));
            }
        }

        self.loading = false;
    }

    /// Create an account, then sign in with the same credentials
    ///
    /// Account creation by itself does not establish a session.
    pub async fn sign_up(&mut self) {
        let email = self.email.trim().to_string();
        let password = self.password.trim().to_string();
        let confirm = self.password_confirm.trim().to_string();

        let identity = match Identity::new(&email) {
            Ok(identity) => identity,
            Err(err) => {
                err.log();
                self.error = Some(messages::EMAIL_REQUIRED.to_string());
                return;
            }
        };
        if password.is_empty() || confirm.is_empty() {
            AuthError::EmptyPassword.log();
            self.error = Some(messages::PASSWORD_REQUIRED.to_string());
            return;
        }
        if password != confirm {
            AuthError::PasswordMismatch.log();
            self.error = Some(messages::PASSWORD_MISMATCH.to_string());
            return;
        }

        self.error = None;
        self.info = None;
        self.loading = true;

        let gateway = Arc::clone(&self.gateway);
        let result = async {
            gateway.create_account(&identity, &password, &confirm).await?;
            gateway.authenticate_with_password(&identity, &password).await
        }
        .await;
        self.loading = false;

        match result {
            Ok(session) => {
                tracing::info!(user = %session.user_id, "Account created and signed in");
                self.session = Some(session);
                self.finish_authenticated();
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::SIGN_UP_FAILED));
            }
        }
    }

    /// Request a one-time code for the given identity
    ///
    /// Returns whether the request succeeded, so sign-in and resend can
    /// chain on it without duplicating message handling.
    pub async fn request_code(&mut self, identity: &str) -> bool {
        let identity = match Identity::new(identity) {
            Ok(identity) => identity,
            Err(err) => {
                err.log();
                self.error = Some(messages::EMAIL_REQUIRED.to_string());
                return false;
            }
        };

        self.error = None;
        self.info = None;
        self.otp_loading = true;
        self.otp_code.clear();

        let gateway = Arc::clone(&self.gateway);
        let result = gateway.request_otp(&identity).await;
        self.otp_loading = false;

        match result {
            Ok(otp_id) => {
                tracing::info!(request = %otp_id, "One-time code requested");
                if let Some(challenge) = &mut self.challenge {
                    challenge.attach_otp(otp_id);
                }
                self.info = Some(messages::OTP_SENT.to_string());
                true
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::OTP_SEND_FAILED));
                false
            }
        }
    }

    /// Complete the pending step-up with the current code input
    pub async fn verify_code(&mut self) {
        let Some((mfa_id, otp_id)) = self
            .challenge
            .as_ref()
            .and_then(|c| Some((c.mfa_id.clone(), c.otp_id.clone()?)))
        else {
            AuthError::OtpNotRequested.log();
            self.error = Some(messages::OTP_NOT_READY.to_string());
            return;
        };

        let code = match OtpCode::new(&self.otp_code) {
            Ok(code) => code,
            Err(err) => {
                err.log();
                self.error = Some(messages::OTP_CODE_REQUIRED.to_string());
                return;
            }
        };

        self.error = None;
        self.info = None;
        self.loading = true;

        let gateway = Arc::clone(&self.gateway);
        let result = gateway.authenticate_with_otp(&otp_id, &code, &mfa_id).await;
        self.loading = false;

        match result {
            Ok(session) => {
                tracing::info!(user = %session.user_id, "Signed in with one-time code");
                self.session = Some(session);
                self.finish_authenticated();
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::OTP_VERIFY_FAILED));
            }
        }
    }

    /// Request a fresh code for the identity the challenge was issued for
    pub async fn resend_code(&mut self) -> bool {
        let Some(identity) = self.challenge.as_ref().map(|c| c.identity.clone()) else {
            self.error = Some(messages::EMAIL_REQUIRED.to_string());
            return false;
        };
        self.request_code(&identity).await
    }

    /// Abandon the pending step-up and return to the sign-in screen
    ///
    /// No-op while any remote call of this flow is in flight.
    pub fn cancel_mfa(&mut self) {
        if self.loading || self.otp_loading {
            return;
        }
        self.step = AuthStep::Login;
        self.reset_transient();
    }

    /// Switch between the sign-in and registration screens
    ///
    /// No-op while any remote call of this flow is in flight; the
    /// step-up screen is only reachable through a sign-in rejection.
    pub fn switch_step(&mut self, step: AuthStep) {
        if self.loading || self.otp_loading {
            return;
        }
        if step == AuthStep::MfaPending {
            return;
        }

        self.step = step;
        self.reset_transient();
        if step == AuthStep::Register {
            self.email.clear();
        }
    }

    /// Sign out: clear the remote auth store and every piece of
    /// transient state
    pub fn sign_out(&mut self) {
        self.gateway.clear();
        self.session = None;
        self.email.clear();
        self.reset_transient();
        self.step = AuthStep::Login;
        tracing::info!("Signed out");
    }

    /// Mirror externally-driven session changes into the flow
    ///
    /// Drains the store watcher; returns whether the session actually
    /// changed (e.g. the stored token was invalidated remotely).
    pub fn sync_session(&mut self) -> bool {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return false;
        }

        let next = self.session_rx.borrow_and_update().clone();
        if next == self.session {
            return false;
        }

        if next.is_none() {
            tracing::info!("Session ended outside the auth flow");
        }
        self.session = next;
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Shared post-authentication cleanup: credentials, challenge, and
    /// code input are gone, flow returns to the (now authenticated)
    /// sign-in step.
    fn finish_authenticated(&mut self) {
        self.email.clear();
        self.password.clear();
        self.password_confirm.clear();
        self.challenge = None;
        self.otp_code.clear();
        self.otp_loading = false;
        self.step = AuthStep::Login;
    }

    fn reset_transient(&mut self) {
        self.error = None;
        self.info = None;
        self.password.clear();
        self.password_confirm.clear();
        self.challenge = None;
        self.otp_code.clear();
        self.otp_loading = false;
    }

    /// The server's own message when it sent one, otherwise the
    /// operation-specific fallback.
    fn remote_text(err: &AuthError, fallback: &str) -> String {
        match err {
            AuthError::Api(api) => api
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }
}
