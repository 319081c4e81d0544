use std::time::{Duration, Instant};

use http::{Extensions, HeaderMap};

use super::Metadata;
use crate::services::auth::Identity;

/// An inbound call as seen by the authenticator.
///
/// - `metadata` is what the caller sent (headers, gRPC metadata, ...)
/// - `extensions` holds typed attributes attached while the call is processed
/// - `deadline` is the caller's own deadline, if the transport carries one
///
/// Attaching an attribute always yields a new value; a `CallContext` handed to
/// the authenticator is never changed in place.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    metadata: Metadata,
    extensions: Extensions,
    deadline: Option<Instant>,
}

impl CallContext {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            extensions: Extensions::new(),
            deadline: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(Metadata::from_headers(headers))
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Time left before the caller's deadline. `Some(ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Derive a copy of this call carrying `identity`.
    pub fn with_identity(&self, identity: Identity) -> Self {
        let mut derived = self.clone();
        derived.extensions.insert(identity);
        derived
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.extensions.get::<Identity>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_identity_leaves_input_untouched() {
        let call = CallContext::new(Metadata::new().with("authorization", "magic x"));
        let derived = call.with_identity(Identity::ServiceToService);

        assert!(call.identity().is_none());
        assert_eq!(derived.identity(), Some(&Identity::ServiceToService));
        assert_eq!(derived.metadata(), call.metadata());
    }

    #[test]
    fn remaining_saturates_after_deadline() {
        let call = CallContext::default().with_deadline(Instant::now());
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(call.remaining(), Some(Duration::ZERO));
        assert!(CallContext::default().remaining().is_none());
    }
}
