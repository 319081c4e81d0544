use axum::http::StatusCode;
use thiserror::Error;

/// Why a call could not be identified.
///
/// Variants are mutually exclusive; identification stops at the first one that
/// applies. Messages never contain the presented credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no authorization metadata in request")]
    MissingMetadata,

    #[error("unexpected number of authorization metadatum: {0}")]
    MalformedMetadata(usize),

    #[error("bad authorization format")]
    MalformedCredential,

    #[error("unknown token type: {0}")]
    UnknownScheme(String),

    #[error("magic auth is not configured")]
    MagicNotConfigured,

    #[error("bad magic token")]
    InvalidCredential,

    #[error("identity service unreachable: {0}")]
    UpstreamUnreachable(#[source] UpstreamError),

    #[error("unexpected status: {0}")]
    UpstreamRejected(StatusCode),

    #[error("decoding identity response: {0}")]
    MalformedUpstreamResponse(#[source] serde_json::Error),

    #[error("no email found in identity")]
    IdentityNotFound,

    #[error("unparseable identity email: {0}")]
    UnparseableIdentity(String),

    #[error("non-employee identity found: {0}")]
    DomainNotAllowed(String),
}

impl AuthError {
    /// Stable snake_case code, used as the `kind` field in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingMetadata => "missing_metadata",
            Self::MalformedMetadata(_) => "malformed_metadata",
            Self::MalformedCredential => "malformed_credential",
            Self::UnknownScheme(_) => "unknown_scheme",
            Self::MagicNotConfigured => "magic_not_configured",
            Self::InvalidCredential => "invalid_credential",
            Self::UpstreamUnreachable(_) => "upstream_unreachable",
            Self::UpstreamRejected(_) => "upstream_rejected",
            Self::MalformedUpstreamResponse(_) => "malformed_upstream_response",
            Self::IdentityNotFound => "identity_not_found",
            Self::UnparseableIdentity(_) => "unparseable_identity",
            Self::DomainNotAllowed(_) => "domain_not_allowed",
        }
    }

    /// True when the identity lookup gave up because of the timeout or the
    /// caller's deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::UpstreamUnreachable(e) if e.is_timeout())
    }
}

/// Transport-level failure talking to the identity service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("call deadline exceeded before identity lookup completed")]
    DeadlineExceeded,
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::DeadlineExceeded => true,
        }
    }
}
