//! BaaS Gateway Implementation
//!
//! Auth operations are collection-scoped endpoints next to the records
//! API. Successful authentication responses carry `{token, record}`; the
//! token and record go into the client's auth store, whose observer
//! registry is bridged here onto a watch channel for the domain side.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::watch;

use baas::{AuthModel, BaasClient, Method, SubscriptionId};
use kernel::id::{MfaChallengeId, OtpRequestId};

use crate::domain::entity::session::Session;
use crate::domain::gateway::{AuthGateway, SessionStore};
use crate::domain::value_object::{identity::Identity, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// Default auth collection name on the service
const DEFAULT_AUTH_COLLECTION: &str = "users";

/// Successful authentication payload
#[derive(Deserialize)]
struct AuthPayload {
    token: String,
    record: AuthModel,
}

fn session_of(record: &AuthModel) -> Session {
    Session::new(record.id.clone(), record.email.clone())
}

/// BaaS-backed auth gateway and session store
///
/// Registers one observer on the client auth store at construction and
/// removes it exactly once on drop, forwarding every store change
/// (including 401-driven clears) into the watch channel handed to
/// subscribers.
pub struct BaasAuthGateway {
    client: Arc<BaasClient>,
    collection: String,
    sessions: watch::Sender<Option<Session>>,
    subscription: SubscriptionId,
}

impl BaasAuthGateway {
    pub fn new(client: Arc<BaasClient>) -> Self {
        Self::with_collection(client, DEFAULT_AUTH_COLLECTION)
    }

    pub fn with_collection(client: Arc<BaasClient>, collection: impl Into<String>) -> Self {
        let initial = client.auth_state().model().map(|m| session_of(&m));
        let (sessions, _) = watch::channel(initial);

        let forward = sessions.clone();
        let subscription = client.auth_state().on_change(move |model| {
            forward.send_replace(model.map(session_of));
        });

        Self {
            client,
            collection: collection.into(),
            sessions,
            subscription,
        }
    }

    fn auth_path(&self, operation: &str) -> String {
        format!("api/collections/{}/{}", self.collection, operation)
    }

    /// Run an authentication endpoint and persist the resulting session
    async fn authenticate(&self, path: String, body: Value) -> Result<Session, baas::Error> {
        let value = self.client.send(Method::POST, &path, &[], Some(&body)).await?;
        let payload: AuthPayload = serde_json::from_value(value)
            .map_err(|e| baas::Error::InvalidResponse(e.to_string()))?;

        let session = session_of(&payload.record);
        self.client.auth_state().save(payload.token, payload.record);
        Ok(session)
    }
}

/// Normalize a password rejection: a step-up demand becomes the
/// distinguished variant, anything else stays a remote error.
fn step_up_or_api(err: baas::Error) -> AuthError {
    match err.mfa_challenge_id() {
        Some(challenge) => AuthError::MfaRequired(challenge),
        None => AuthError::Api(err),
    }
}

impl AuthGateway for BaasAuthGateway {
    async fn authenticate_with_password(
        &self,
        identity: &Identity,
        password: &str,
    ) -> AuthResult<Session> {
        let body = json!({
            "identity": identity.as_str(),
            "password": password,
        });
        self.authenticate(self.auth_path("auth-with-password"), body)
            .await
            .map_err(step_up_or_api)
    }

    async fn create_account(
        &self,
        identity: &Identity,
        password: &str,
        password_confirm: &str,
    ) -> AuthResult<()> {
        let body = json!({
            "email": identity.as_str(),
            "password": password,
            "passwordConfirm": password_confirm,
        });
        self.client
            .send(
                Method::POST,
                &format!("api/collections/{}/records", self.collection),
                &[],
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn request_otp(&self, identity: &Identity) -> AuthResult<OtpRequestId> {
        #[derive(Deserialize)]
        struct OtpPayload {
            #[serde(rename = "otpId")]
            otp_id: OtpRequestId,
        }

        let body = json!({ "email": identity.as_str() });
        let value = self
            .client
            .send(Method::POST, &self.auth_path("request-otp"), &[], Some(&body))
            .await?;
        let payload: OtpPayload = serde_json::from_value(value)
            .map_err(|e| AuthError::Api(baas::Error::InvalidResponse(e.to_string())))?;
        Ok(payload.otp_id)
    }

    async fn authenticate_with_otp(
        &self,
        request: &OtpRequestId,
        code: &OtpCode,
        challenge: &MfaChallengeId,
    ) -> AuthResult<Session> {
        let body = json!({
            "otpId": request.as_str(),
            "password": code.as_str(),
            "mfaId": challenge.as_str(),
        });
        self.authenticate(self.auth_path("auth-with-otp"), body)
            .await
            .map_err(AuthError::from)
    }
}

impl SessionStore for BaasAuthGateway {
    fn current(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }

    fn clear(&self) {
        self.client.auth_state().clear();
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}

impl Drop for BaasAuthGateway {
    fn drop(&mut self) {
        self.client.auth_state().unsubscribe(self.subscription);
    }
}
