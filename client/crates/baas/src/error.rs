//! BaaS Wire Error Types
//!
//! The service reports failures as `{code, message, data}` JSON payloads.
//! A sign-in rejection that requires a second factor additionally carries
//! a step-up challenge identifier; [`Error::mfa_challenge_id`] is the one
//! place that knows both payload shapes.

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use kernel::id::MfaChallengeId;
use serde_json::Value;
use thiserror::Error as ThisError;

/// BaaS-specific result type alias
pub type BaasResult<T> = Result<T, Error>;

/// Errors produced while talking to the remote service
#[derive(Debug, ThisError)]
pub enum Error {
    /// The service answered with a non-success status and an error payload
    #[error("{message}")]
    Api {
        /// HTTP status of the response
        status: u16,
        /// Human-readable message from the payload (may be empty)
        message: String,
        /// Decoded error payload, kept verbatim for field inspection
        payload: Value,
    },

    /// The request never produced a usable response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    /// A request path could not be joined onto the base URL
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Build an [`Error::Api`] from a response body
    ///
    /// Falls back to the HTTP reason phrase when the body is not the
    /// expected payload shape. Public so tests and fakes can fabricate
    /// wire-accurate rejections.
    pub fn api_from_body(status: u16, body: &str) -> Self {
        let payload: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| ErrorKind::from_status(status).as_str().to_string());

        Error::Api {
            status,
            message,
            payload,
        }
    }

    /// Step-up challenge identifier carried by a rejection, if any
    ///
    /// The identifier appears either at the payload root or nested one
    /// level under `data`, depending on the service version. Returns
    /// `None` for empty strings and for every other error shape, so a
    /// plain credential rejection is not mistaken for a step-up.
    pub fn mfa_challenge_id(&self) -> Option<MfaChallengeId> {
        let Error::Api { payload, .. } = self else {
            return None;
        };

        payload
            .get("mfaId")
            .or_else(|| payload.pointer("/data/mfaId"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(MfaChallengeId::from_raw)
    }

    /// The server-provided message, when one exists
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api { status, .. } => ErrorKind::from_status(*status),
            Error::Network(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            Error::Network(_) => ErrorKind::ServiceUnavailable,
            Error::InvalidResponse(_) => ErrorKind::InternalServerError,
            Error::Url(_) => ErrorKind::BadRequest,
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::Api { status, message, .. } => AppError::from_status(status, message),
            Error::Network(e) => AppError::from(e),
            Error::InvalidResponse(msg) => AppError::internal(msg),
            Error::Url(e) => AppError::bad_request(format!("Invalid request URL: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_from_body_with_payload() {
        let err = Error::api_from_body(400, r#"{"code":400,"message":"Failed to authenticate.","data":{}}"#);
        match &err {
            Error::Api { status, message, .. } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Failed to authenticate.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.server_message(), Some("Failed to authenticate."));
    }

    #[test]
    fn test_api_from_body_garbage() {
        let err = Error::api_from_body(503, "<html>oops</html>");
        assert_eq!(err.server_message(), Some("Service Unavailable"));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_mfa_id_direct() {
        let err = Error::api_from_body(401, r#"{"message":"Requires MFA.","mfaId":"mfa1234567890ab"}"#);
        let id = err.mfa_challenge_id().expect("direct mfaId");
        assert_eq!(id.as_str(), "mfa1234567890ab");
    }

    #[test]
    fn test_mfa_id_nested() {
        let err = Error::api_from_body(
            401,
            r#"{"message":"Requires MFA.","data":{"mfaId":"mfa1234567890ab"}}"#,
        );
        let id = err.mfa_challenge_id().expect("nested mfaId");
        assert_eq!(id.as_str(), "mfa1234567890ab");
    }

    #[test]
    fn test_mfa_id_prefers_direct() {
        let err = Error::api_from_body(
            401,
            r#"{"mfaId":"direct1234567890","data":{"mfaId":"nested1234567890"}}"#,
        );
        assert_eq!(err.mfa_challenge_id().unwrap().as_str(), "direct1234567890");
    }

    #[test]
    fn test_mfa_id_absent_or_empty() {
        let plain = Error::api_from_body(400, r#"{"message":"Failed to authenticate."}"#);
        assert!(plain.mfa_challenge_id().is_none());

        let empty = Error::api_from_body(401, r#"{"mfaId":""}"#);
        assert!(empty.mfa_challenge_id().is_none());

        let wrong_type = Error::api_from_body(401, r#"{"mfaId":42}"#);
        assert!(wrong_type.mfa_challenge_id().is_none());
    }

    #[test]
    fn test_app_error_conversion() {
        let err = Error::api_from_body(404, r#"{"message":"Record not found."}"#);
        let app: AppError = err.into();
        assert_eq!(app.kind(), ErrorKind::NotFound);
        assert_eq!(app.message(), "Record not found.");
    }
}
