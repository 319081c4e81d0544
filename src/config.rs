/*
 * Responsibility
 * - Read settings from the environment (.env is honoured via dotenvy)
 * - Validate them eagerly: a missing or invalid key fails startup
 * - Produce the immutable AuthenticatorConfig handed to the authenticator
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::services::auth::{AllowedDomains, AuthenticatorConfig, Protocol};

/// Identity service used when `G5_AUTH_ENDPOINT` is not set.
pub const DEFAULT_AUTH_ENDPOINT: &str = "auth.g5search.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub authenticator: AuthenticatorConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        Ok(Self {
            addr,
            app_env,
            authenticator: authenticator_from_lookup(&lookup)?,
        })
    }
}

/// `G5_AUTH_*` settings for the authenticator.
pub fn authenticator_from_lookup<F>(lookup: &F) -> Result<AuthenticatorConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint = lookup("G5_AUTH_ENDPOINT")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AUTH_ENDPOINT.to_string());

    let default_protocol = match lookup("G5_AUTH_PROTOCOL") {
        Some(p) => p
            .parse::<Protocol>()
            .map_err(|_| ConfigError::Invalid("G5_AUTH_PROTOCOL"))?,
        None => Protocol::Https,
    };
    let (protocol, hostname) = split_endpoint(endpoint.trim(), default_protocol)?;

    let timeout = match lookup("G5_AUTH_TIMEOUT_MS") {
        Some(ms) => ms
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .ok_or(ConfigError::Invalid("G5_AUTH_TIMEOUT_MS"))?,
        None => crate::services::auth::config::DEFAULT_TIMEOUT,
    };

    let allowed_domains = match lookup("G5_AUTH_ALLOWED_DOMAINS") {
        Some(raw) => {
            let domains = AllowedDomains::new(
                raw.split(',')
                    .map(|s| s.trim().to_ascii_lowercase())
                    .filter(|s| !s.is_empty()),
            );
            if domains.is_empty() {
                return Err(ConfigError::Invalid("G5_AUTH_ALLOWED_DOMAINS"));
            }
            domains
        }
        None => AllowedDomains::default(),
    };

    Ok(AuthenticatorConfig::new(hostname)
        .with_protocol(protocol)
        .with_timeout(timeout)
        .with_magic_token(lookup("G5_AUTH_MAGIC_TOKEN"))
        .with_allowed_domains(allowed_domains))
}

/// Split `https://auth.example.com:8443` into `(Https, "auth.example.com:8443")`.
/// Endpoints without a scheme keep `default_protocol`.
fn split_endpoint(
    endpoint: &str,
    default_protocol: Protocol,
) -> Result<(Protocol, String), ConfigError> {
    if !endpoint.contains("://") {
        return Ok((default_protocol, endpoint.trim_end_matches('/').to_string()));
    }

    let url = Url::parse(endpoint).map_err(|_| ConfigError::Invalid("G5_AUTH_ENDPOINT"))?;
    let protocol = url
        .scheme()
        .parse::<Protocol>()
        .map_err(|_| ConfigError::Invalid("G5_AUTH_ENDPOINT"))?;
    let host = url
        .host_str()
        .ok_or(ConfigError::Invalid("G5_AUTH_ENDPOINT"))?;

    let hostname = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok((protocol, hostname))
}
