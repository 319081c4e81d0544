use axum::Json;

use crate::api::v1::dto::whoami::WhoamiResponse;
use crate::api::v1::extractors::IdentityExtractor;

/// GET /api/v1/whoami: echo the identity the middleware attached.
pub async fn whoami(IdentityExtractor(identity): IdentityExtractor) -> Json<WhoamiResponse> {
    let service = identity.is_service();
    Json(WhoamiResponse { identity, service })
}
