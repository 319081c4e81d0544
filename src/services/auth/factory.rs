/// Factory: build the shared `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{Authenticator, BuildError, CallAuthenticator};

pub fn build_authenticator(config: &Config) -> Result<Arc<dyn CallAuthenticator>, BuildError> {
    let auth = Authenticator::new(config.authenticator.clone())?;

    tracing::info!(
        identity_url = %auth.config().me_url(),
        magic_enabled = auth.config().magic_token.is_some(),
        allowed_domains = ?auth.config().allowed_domains.iter().collect::<Vec<_>>(),
        "authenticator ready"
    );

    Ok(Arc::new(auth))
}
