use async_trait::async_trait;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{
    config::AuthenticatorConfig,
    credential::Credential,
    error::AuthError,
    identity::Identity,
    identity_client::IdentityClient,
};
use crate::call::CallContext;

/// Metadata key carrying the credential.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Something that can turn an inbound call into an identified one.
///
/// Middleware depends on this trait rather than on [`Authenticator`] so that
/// tests and alternative transports can plug in their own implementation.
#[async_trait]
pub trait CallAuthenticator: Send + Sync {
    /// Verify the credential in `call`'s metadata.
    ///
    /// On success returns a copy of `call` with an [`Identity`] attached; `call`
    /// itself is not modified. No identity is ever returned alongside an error.
    async fn identify_context(&self, call: &CallContext) -> Result<CallContext, AuthError>;
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid identity service url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("building http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Identifies calls by magic token or by asking the identity service.
///
/// Holds only immutable configuration and a pooled HTTP client, so a single
/// instance is shared (behind `Arc`) across all concurrent calls.
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthenticatorConfig,
    identity: IdentityClient,
}

impl Authenticator {
    pub fn new(config: AuthenticatorConfig) -> Result<Self, BuildError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_http_client(config, http)
    }

    /// Same as [`Authenticator::new`] but reuses an existing HTTP client.
    pub fn with_http_client(
        config: AuthenticatorConfig,
        http: reqwest::Client,
    ) -> Result<Self, BuildError> {
        let raw = config.me_url();
        let me_url = Url::parse(&raw).map_err(|source| BuildError::InvalidUrl { url: raw, source })?;
        let identity = IdentityClient::new(http, me_url, config.timeout);

        Ok(Self { config, identity })
    }

    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    async fn identify(&self, call: &CallContext) -> Result<Identity, AuthError> {
        let raw = single_authorization(call)?;
        let credential = Credential::parse(raw)?;
        debug!(scheme = credential.scheme(), "credential parsed");

        match credential {
            Credential::Magic(secret) => self.check_magic(&secret),
            Credential::Bearer(token) => self.verify_bearer(&token, call).await,
            Credential::Unknown(scheme) => Err(AuthError::UnknownScheme(scheme)),
        }
    }

    fn check_magic(&self, presented: &str) -> Result<Identity, AuthError> {
        let expected = self
            .config
            .magic_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MagicNotConfigured)?;

        if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(Identity::ServiceToService)
        } else {
            Err(AuthError::InvalidCredential)
        }
    }

    async fn verify_bearer(&self, token: &str, call: &CallContext) -> Result<Identity, AuthError> {
        let email = self.identity.lookup_email(token, call.remaining()).await?;
        self.config.allowed_domains.validate(&email)?;
        Ok(Identity::Email(email))
    }
}

#[async_trait]
impl CallAuthenticator for Authenticator {
    async fn identify_context(&self, call: &CallContext) -> Result<CallContext, AuthError> {
        match self.identify(call).await {
            Ok(identity) => {
                debug!(%identity, "call identified");
                Ok(call.with_identity(identity))
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "call identification failed");
                Err(err)
            }
        }
    }
}

fn single_authorization(call: &CallContext) -> Result<&str, AuthError> {
    let values = call
        .metadata()
        .get_all(AUTHORIZATION_KEY)
        .ok_or(AuthError::MissingMetadata)?;

    match values {
        [only] => Ok(only.as_str()),
        _ => Err(AuthError::MalformedMetadata(values.len())),
    }
}
