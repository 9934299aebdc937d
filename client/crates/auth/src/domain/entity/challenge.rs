//! Pending Step-Up Challenge Entity
//!
//! Created when a sign-in rejection carries a step-up identifier; lives
//! until cancel, successful verification, or sign-out. Verification needs
//! both the challenge identifier (from the rejection) and the one-time
//! code request identifier (from the OTP request).

use kernel::id::{MfaChallengeId, OtpRequestId};

/// In-flight multi-factor challenge
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChallenge {
    /// Step-up identifier issued with the sign-in rejection
    pub mfa_id: MfaChallengeId,
    /// Identity the challenge was issued for (used for resends)
    pub identity: String,
    /// One-time-code request identifier, once a code has been requested
    pub otp_id: Option<OtpRequestId>,
}

impl PendingChallenge {
    /// Create a challenge fresh from a sign-in rejection
    pub fn new(mfa_id: MfaChallengeId, identity: impl Into<String>) -> Self {
        Self {
            mfa_id,
            identity: identity.into(),
            otp_id: None,
        }
    }

    /// Record the request identifier of the latest one-time code
    ///
    /// A resend replaces any previous identifier; only the newest code
    /// can complete the challenge.
    pub fn attach_otp(&mut self, otp_id: OtpRequestId) {
        self.otp_id = Some(otp_id);
    }

    /// Whether a verification attempt is permitted
    pub fn can_verify(&self) -> bool {
        self.otp_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_requires_otp_request() {
        let mut challenge =
            PendingChallenge::new(MfaChallengeId::from_raw("mfa123"), "user@example.com");
        assert!(!challenge.can_verify());

        challenge.attach_otp(OtpRequestId::from_raw("otp123"));
        assert!(challenge.can_verify());
    }

    #[test]
    fn test_resend_replaces_request_id() {
        let mut challenge =
            PendingChallenge::new(MfaChallengeId::from_raw("mfa123"), "user@example.com");
        challenge.attach_otp(OtpRequestId::from_raw("first"));
        challenge.attach_otp(OtpRequestId::from_raw("second"));

        assert_eq!(challenge.otp_id.as_ref().unwrap().as_str(), "second");
    }
}
