//! BaaS HTTP Client
//!
//! One explicitly constructed client per process scope; everything that
//! talks to the service goes through [`BaasClient::send`], which injects
//! the stored token and normalizes failures into [`Error`].

use kernel::error::app_error::{AppError, AppResult};
use reqwest::{Method, header};
use serde_json::Value;
use url::Url;

use crate::auth_state::AuthState;
use crate::config::BaasConfig;
use crate::error::{BaasResult, Error};
use crate::records::RecordService;

/// HTTP client for the hosted service
///
/// Holds the auth state store; a `401` on an authenticated call clears it,
/// which is how external token invalidation reaches the rest of the app.
/// Requests are never auto-cancelled, so overlapping identical reads are
/// legitimate.
pub struct BaasClient {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthState,
}

impl BaasClient {
    /// Build a client from the startup configuration
    pub fn new(config: BaasConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            auth: AuthState::new(),
        })
    }

    /// Base URL this client was configured with
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The persistent auth state store
    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    /// Record access scoped to one collection
    pub fn collection<'a>(&'a self, name: &'a str) -> RecordService<'a> {
        RecordService::new(self, name)
    }

    /// Issue a JSON request against the service
    ///
    /// `path` is relative to the base URL (no leading slash). Success with
    /// an empty body (e.g. record deletion) yields `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> BaasResult<Value> {
        let url = self.base_url.join(path)?;

        let mut request = self.http.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }

        // The service expects the raw token in Authorization, no scheme.
        let token = self.auth.token();
        let authenticated = token.is_some();
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| Error::InvalidResponse(e.to_string()));
        }

        // The stored token is no longer accepted: drop it so observers see
        // the session loss.
        if status == reqwest::StatusCode::UNAUTHORIZED && authenticated {
            tracing::warn!(%path, "Stored token rejected, clearing auth state");
            self.auth.clear();
        }

        let error = Error::api_from_body(status.as_u16(), &text);
        if status.is_server_error() {
            tracing::error!(%method, %path, status = status.as_u16(), "Service error");
        } else {
            tracing::debug!(%method, %path, status = status.as_u16(), "Request rejected");
        }

        Err(error)
    }
}
