pub mod authenticator;
pub mod config;
pub mod credential;
pub mod domains;
pub mod error;
pub mod factory;
pub mod identity;
pub mod identity_client;

pub use authenticator::{AUTHORIZATION_KEY, Authenticator, BuildError, CallAuthenticator};
pub use config::{AuthenticatorConfig, Protocol};
pub use credential::Credential;
pub use domains::AllowedDomains;
pub use error::{AuthError, UpstreamError};
pub use factory::build_authenticator;
pub use identity::{Identity, SERVICE_TO_SERVICE_IDENTITY};
