//! Identify the caller → put `Identity` into request extensions.
//!
//! - Request headers become call metadata (`Authorization` → `authorization`)
//! - The authenticator does all the deciding; this layer only adapts HTTP
//! - Failures are already logged by the authenticator with their `kind`

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::call::CallContext;
use crate::error::AppError;
use crate::state::AppState;

/// Put the identification middleware in front of every route in `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::identify::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take a State extractor in axum 0.8; pass the state explicitly
    router.layer(middleware::from_fn_with_state(state, identify_middleware))
}

async fn identify_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let call = CallContext::from_headers(req.headers());

    let identified = state.auth.identify_context(&call).await?;

    let identity = identified.identity().cloned().ok_or_else(|| {
        tracing::error!("authenticator returned a call without identity");
        AppError::Internal
    })?;

    tracing::debug!(%identity, "request identified");

    // middleware → extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
