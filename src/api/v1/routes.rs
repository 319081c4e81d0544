/*
 * Responsibility
 * - v1 URL layout
 * - every v1 route sits behind the identify middleware
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::whoami::whoami;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new().route("/whoami", get(whoami));
    middleware::auth::identify::apply(router, state)
}
