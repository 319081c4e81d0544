use std::fmt;

use crate::config::{ConfigError, DEFAULT_AUTH_ENDPOINT};

use super::endpoint::OAuthEndpoint;

/// Redirect URL for clients without a browser (service accounts, CLIs).
pub const OOB_REDIRECT_URL: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Username/password of a service account used for the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// OAuth2 client registration for the identity service.
#[derive(Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub endpoint: OAuthEndpoint,
    pub redirect_url: String,
    pub service_account: Option<ServiceAccount>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the client secret
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("endpoint", &self.endpoint)
            .field("redirect_url", &self.redirect_url)
            .field("service_account", &self.service_account)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        endpoint: &str,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            endpoint: OAuthEndpoint::from_endpoint(endpoint),
            redirect_url: OOB_REDIRECT_URL.to_string(),
            service_account: None,
        }
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = url.into();
        self
    }

    pub fn with_service_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.service_account = Some(ServiceAccount {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `G5_AUTH_CLIENT_ID` / `G5_AUTH_CLIENT_SECRET` are required;
    /// `G5_AUTH_USERNAME` + `G5_AUTH_PASSWORD` enable the service account.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let client_id =
            non_empty("G5_AUTH_CLIENT_ID").ok_or(ConfigError::Missing("G5_AUTH_CLIENT_ID"))?;
        let client_secret = non_empty("G5_AUTH_CLIENT_SECRET")
            .ok_or(ConfigError::Missing("G5_AUTH_CLIENT_SECRET"))?;
        let endpoint =
            non_empty("G5_AUTH_ENDPOINT").unwrap_or_else(|| DEFAULT_AUTH_ENDPOINT.to_string());

        let config = Self::new(client_id, client_secret, &endpoint);

        Ok(
            match (non_empty("G5_AUTH_USERNAME"), non_empty("G5_AUTH_PASSWORD")) {
                (Some(user), Some(pass)) => config.with_service_account(user, pass),
                _ => config,
            },
        )
    }
}
