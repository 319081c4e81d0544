//! Remote identity lookup (`GET /v1/me`).
//!
//! The identity service answers "whose token is this?" with `{"email": "..."}`.
//! This module only talks HTTP and decodes; the domain policy lives in
//! `domains.rs` and the orchestration in `authenticator.rs`.

use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::error::{AuthError, UpstreamError};

/// Pull `email` out of a `/v1/me` body.
///
/// The key is matched case-insensitively (`Email`, `EMAIL`, ...), an exact
/// `email` key wins over other spellings. `null` or a missing key is `None`;
/// anything that is not a JSON object, or a non-string email, is an error.
fn decode_email(body: &[u8]) -> Result<Option<String>, serde_json::Error> {
    let fields: Map<String, Value> = serde_json::from_slice(body)?;

    let value = fields.get("email").or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("email"))
            .map(|(_, value)| value)
    });

    match value {
        Some(value) => serde_json::from_value(value.clone()),
        None => Ok(None),
    }
}

/// Client for the identity service.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    me_url: Url,
    timeout: Duration,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, me_url: Url, timeout: Duration) -> Self {
        Self {
            http,
            me_url,
            timeout,
        }
    }

    /// Ask the identity service who owns `token`.
    ///
    /// `remaining` is the time left on the caller's deadline, if any. The
    /// effective budget is the smaller of that and the configured timeout, and
    /// it covers connect, headers and body.
    ///
    /// Returns the non-empty email exactly as the service sent it.
    pub async fn lookup_email(
        &self,
        token: &str,
        remaining: Option<Duration>,
    ) -> Result<String, AuthError> {
        let timeout = match remaining {
            Some(left) if left.is_zero() => {
                return Err(AuthError::UpstreamUnreachable(
                    UpstreamError::DeadlineExceeded,
                ));
            }
            Some(left) => left.min(self.timeout),
            None => self.timeout,
        };

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AuthError::MalformedCredential)?;
        authorization.set_sensitive(true);

        debug!(url = %self.me_url, ?timeout, "requesting identity");

        let resp = self
            .http
            .get(self.me_url.clone())
            .header(header::AUTHORIZATION, authorization)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| AuthError::UpstreamUnreachable(e.into()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(AuthError::UpstreamRejected(status));
        }

        // Body read failures are transport failures, not decoding failures.
        let body = resp
            .bytes()
            .await
            .map_err(|e| AuthError::UpstreamUnreachable(e.into()))?;

        let email = decode_email(&body).map_err(AuthError::MalformedUpstreamResponse)?;

        match email {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(AuthError::IdentityNotFound),
        }
    }
}
