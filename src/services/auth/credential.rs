use std::fmt;

use super::error::AuthError;

/// Credential parsed from a single `authorization` metadata value.
///
/// The set of schemes is closed: a new scheme means a new variant here and a
/// new arm in the authenticator's dispatch.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// `bearer <token>`: verified remotely by the identity service.
    Bearer(String),
    /// `magic <secret>`: compared against the configured pre-shared secret.
    Magic(String),
    /// Well-formed, but the scheme is not one we accept.
    Unknown(String),
}

impl Credential {
    pub const BEARER: &'static str = "bearer";
    pub const MAGIC: &'static str = "magic";

    /// Parse `"<scheme> <value>"`.
    ///
    /// Exactly one space, both halves non-empty. Scheme matching is exact and
    /// case-sensitive (`Bearer x` is an unknown scheme).
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let (scheme, value) = raw.split_once(' ').ok_or(AuthError::MalformedCredential)?;
        if scheme.is_empty() || value.is_empty() || value.contains(' ') {
            return Err(AuthError::MalformedCredential);
        }

        Ok(match scheme {
            Self::BEARER => Self::Bearer(value.to_owned()),
            Self::MAGIC => Self::Magic(value.to_owned()),
            other => Self::Unknown(other.to_owned()),
        })
    }

    pub fn scheme(&self) -> &str {
        match self {
            Self::Bearer(_) => Self::BEARER,
            Self::Magic(_) => Self::MAGIC,
            Self::Unknown(scheme) => scheme,
        }
    }
}

// Never print the secret half.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("scheme", &self.scheme())
            .finish_non_exhaustive()
    }
}
