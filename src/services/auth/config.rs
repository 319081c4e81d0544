use std::{fmt, str::FromStr, time::Duration};

use super::domains::AllowedDomains;

/// How long to wait for the identity service unless told otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Scheme used to reach the identity service.
///
/// Always `Https` in deployments; `Http` exists for test harnesses that run a
/// plain-text stub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "https" => Ok(Self::Https),
            "http" => Ok(Self::Http),
            other => Err(format!("unsupported protocol: {other}")),
        }
    }
}

/// Immutable authenticator settings.
///
/// Built once and handed to [`Authenticator::new`](super::Authenticator::new);
/// several authenticators with different settings can live side by side.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// Budget for the whole identity request/response cycle.
    pub timeout: Duration,
    /// Pre-shared secret accepted in place of a bearer token. `None` disables
    /// the `magic` scheme.
    pub magic_token: Option<String>,
    /// Identity service host (and optional port), without scheme.
    pub auth_hostname: String,
    pub protocol: Protocol,
    pub allowed_domains: AllowedDomains,
}

impl AuthenticatorConfig {
    pub fn new(auth_hostname: impl Into<String>) -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            magic_token: None,
            auth_hostname: auth_hostname.into(),
            protocol: Protocol::Https,
            allowed_domains: AllowedDomains::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// An empty secret counts as "not configured".
    pub fn with_magic_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.magic_token = token.map(Into::into).filter(|t| !t.is_empty());
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_allowed_domains(mut self, domains: AllowedDomains) -> Self {
        self.allowed_domains = domains;
        self
    }

    /// `{protocol}://{auth_hostname}/v1/me`
    pub fn me_url(&self) -> String {
        format!("{}://{}/v1/me", self.protocol, self.auth_hostname)
    }
}

impl fmt::Debug for AuthenticatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the magic token
        f.debug_struct("AuthenticatorConfig")
            .field("timeout", &self.timeout)
            .field("magic_token", &self.magic_token.as_ref().map(|_| "<redacted>"))
            .field("auth_hostname", &self.auth_hostname)
            .field("protocol", &self.protocol)
            .field("allowed_domains", &self.allowed_domains)
            .finish()
    }
}
