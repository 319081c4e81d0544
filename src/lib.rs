//! Request authentication for inbound calls.
//!
//! A call carries `authorization: <scheme> <credential>` in its metadata.
//! [`Authenticator`] accepts two schemes:
//!
//! - `magic <secret>`: a pre-shared secret for trusted service-to-service
//!   calls, compared locally; yields the `service-to-service` identity.
//! - `bearer <token>`: verified by asking the identity service
//!   (`GET /v1/me`), then the returned email's domain is checked against an
//!   allowlist; yields that email.
//!
//! The identity is attached to a derived [`CallContext`]; failures are
//! reported as [`AuthError`].
//!
//! ```ignore
//! let auth = Authenticator::new(AuthenticatorConfig::new("auth.g5search.com"))?;
//! let call = CallContext::new(Metadata::new().with("authorization", "bearer 12345"));
//! let identified = auth.identify_context(&call).await?;
//! assert_eq!(identified.identity().unwrap().as_str(), "someone@getg5.com");
//! ```

pub mod api;
pub mod app;
pub mod call;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use call::{CallContext, Metadata};
pub use services::auth::{
    AllowedDomains, AuthError, Authenticator, AuthenticatorConfig, CallAuthenticator, Identity,
    Protocol,
};
