use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;
use crate::state::AppState;

/// Extractor for handlers that need the caller's `Identity`.
///
/// Relies on the identify middleware having inserted it into the request
/// extensions; returns 401 when it is missing (route not behind the middleware).
pub struct IdentityExtractor(pub Identity);

impl FromRequestParts<AppState> for IdentityExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(IdentityExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
