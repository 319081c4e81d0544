/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::CallAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn CallAuthenticator>,
}

impl AppState {
    pub fn new(auth: Arc<dyn CallAuthenticator>) -> Self {
        Self { auth }
    }
}
