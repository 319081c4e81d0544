use serde::Serialize;

use crate::services::auth::Identity;

/// Response body for `GET /api/v1/whoami`.
#[derive(Debug, Clone, Serialize)]
pub struct WhoamiResponse {
    pub identity: Identity,
    /// True for magic-token (service-to-service) callers.
    pub service: bool,
}
