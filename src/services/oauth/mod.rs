//! OAuth2 client side: obtaining bearer tokens from the identity service.
//!
//! Counterpart of `services::auth`: tokens issued here are what callers put in
//! `authorization: bearer <token>`.

pub mod config;
pub mod endpoint;
pub mod token_client;

pub use config::{ClientConfig, OOB_REDIRECT_URL, ServiceAccount};
pub use endpoint::OAuthEndpoint;
pub use token_client::{TokenClient, TokenError, TokenResponse};
