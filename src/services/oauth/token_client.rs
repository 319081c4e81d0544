use std::fmt;

use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::ClientConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing service account username/password")]
    MissingServiceAccount,

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token request rejected: {status} ({code})")]
    Rejected { status: StatusCode, code: String },

    #[error("decoding token response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Token endpoint response (RFC 6749 §5.1).
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Usually "Bearer"
    #[serde(default)]
    pub token_type: Option<String>,
    /// Seconds until expiry, when the server says.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Value for the `authorization` metadata entry of an outgoing call.
    pub fn authorization_value(&self) -> String {
        format!("bearer {}", self.access_token)
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print tokens
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    error: String,
}

/// Password-grant token client.
///
/// The identity server expects client credentials in the form body rather than
/// in an HTTP basic `Authorization` header, so they are always sent that way.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TokenClient {
    pub fn new(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange a username/password for a token (resource owner password grant).
    pub async fn password_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, TokenError> {
        let form = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        debug!(url = %self.config.endpoint.token_url, username, "requesting password grant token");

        let resp = self
            .http
            .post(&self.config.endpoint.token_url)
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let code = serde_json::from_slice::<OAuthErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| "unknown_error".to_string());
            warn!(%status, code = %code, "token request rejected");
            return Err(TokenError::Rejected { status, code });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Password grant using the configured service account.
    pub async fn service_account_token(&self) -> Result<TokenResponse, TokenError> {
        let account = self
            .config
            .service_account
            .as_ref()
            .ok_or(TokenError::MissingServiceAccount)?;
        self.password_token(&account.username, &account.password)
            .await
    }
}
