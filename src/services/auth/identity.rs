use std::fmt;

use serde::{Serialize, Serializer};

/// Identity returned for callers that presented the pre-shared magic token.
pub const SERVICE_TO_SERVICE_IDENTITY: &str = "service-to-service";

/// The authenticated principal attached to a call.
///
/// Only the authenticator constructs `Email` identities, and only after the
/// identity service vouched for the token and the domain passed the allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Verified email address, exactly as returned by the identity service.
    Email(String),
    /// Trusted service-to-service caller (magic token).
    ServiceToService,
}

impl Identity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(email) => email,
            Self::ServiceToService => SERVICE_TO_SERVICE_IDENTITY,
        }
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::ServiceToService)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
