//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::MfaChallengeId;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identity input was empty after trimming
    #[error("Identity cannot be empty")]
    EmptyIdentity,

    /// Password input was empty after trimming
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// Password and confirmation differ
    #[error("Password confirmation does not match")]
    PasswordMismatch,

    /// One-time code input was empty after trimming
    #[error("One-time code cannot be empty")]
    EmptyOtpCode,

    /// Verification attempted before both step-up identifiers were present
    #[error("No one-time code has been requested")]
    OtpNotRequested,

    /// Sign-in was rejected pending a one-time code step-up
    ///
    /// Produced by the gateway after normalizing the rejection payload;
    /// callers never inspect the wire shape themselves.
    #[error("Multi-factor step-up required")]
    MfaRequired(MfaChallengeId),

    /// The remote call failed
    #[error(transparent)]
    Api(#[from] baas::Error),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmptyIdentity
            | AuthError::EmptyPassword
            | AuthError::PasswordMismatch
            | AuthError::EmptyOtpCode => ErrorKind::BadRequest,
            AuthError::OtpNotRequested => ErrorKind::UnprocessableEntity,
            AuthError::MfaRequired(_) => ErrorKind::Unauthorized,
            AuthError::Api(e) => e.kind(),
        }
    }

    /// Whether this error was produced without any remote call
    pub fn is_local(&self) -> bool {
        !matches!(self, AuthError::Api(_) | AuthError::MfaRequired(_))
    }

    /// Convert to AppError
    pub fn to_app_error(self) -> AppError {
        match self {
            AuthError::Api(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::MfaRequired(challenge) => {
                tracing::info!(challenge = %challenge, "Sign-in requires a step-up");
            }
            AuthError::Api(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Auth service error");
            }
            AuthError::Api(e) => {
                tracing::warn!(error = %e, "Auth call rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth input rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::EmptyIdentity.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::PasswordMismatch.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::OtpNotRequested.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(
            AuthError::MfaRequired(MfaChallengeId::from_raw("m1")).kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_is_local() {
        assert!(AuthError::EmptyIdentity.is_local());
        assert!(AuthError::OtpNotRequested.is_local());
        assert!(!AuthError::MfaRequired(MfaChallengeId::from_raw("m1")).is_local());
        assert!(!AuthError::Api(baas::Error::InvalidResponse("x".into())).is_local());
    }

    #[test]
    fn test_to_app_error_keeps_remote_kind() {
        let remote = AuthError::Api(baas::Error::Api {
            status: 404,
            message: "Record not found.".into(),
            payload: serde_json::Value::Null,
        });
        let app = remote.to_app_error();
        assert_eq!(app.kind(), ErrorKind::NotFound);
        assert_eq!(app.message(), "Record not found.");
    }
}
