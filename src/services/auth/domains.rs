use std::collections::BTreeSet;

use super::error::AuthError;

/// Employee domains accepted when no allowlist is configured.
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 3] =
    ["getg5.com", "g5platform.com", "g5searchmarketing.com"];

/// Fixed set of email domains whose owners may be identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedDomains {
    domains: BTreeSet<String>,
}

impl AllowedDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Check that `email` is `local@domain` with an allowed `domain`.
    ///
    /// Rejections carry the full email (audit trail), not just the domain.
    pub fn validate(&self, email: &str) -> Result<(), AuthError> {
        let mut parts = email.split('@');
        let (Some(_local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AuthError::UnparseableIdentity(email.to_owned()));
        };

        if self.contains(domain) {
            Ok(())
        } else {
            Err(AuthError::DomainNotAllowed(email.to_owned()))
        }
    }
}

impl Default for AllowedDomains {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAINS)
    }
}
