/*
 * Responsibility
 * - HTTP-facing AppError and its IntoResponse (status + JSON error body)
 * - Map AuthError kinds onto 401 / 403 / 502 without echoing details
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("identity service unavailable")]
    BadGateway,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::BadGateway => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // The identity service could not be asked, or answered garbage.
            AuthError::UpstreamUnreachable(_) | AuthError::MalformedUpstreamResponse(_) => {
                AppError::BadGateway
            }
            // Authenticated, but not one of ours.
            AuthError::DomainNotAllowed(_) => AppError::Forbidden,
            AuthError::MissingMetadata
            | AuthError::MalformedMetadata(_)
            | AuthError::MalformedCredential
            | AuthError::UnknownScheme(_)
            | AuthError::MagicNotConfigured
            | AuthError::InvalidCredential
            | AuthError::UpstreamRejected(_)
            | AuthError::IdentityNotFound
            | AuthError::UnparseableIdentity(_) => AppError::Unauthorized,
        }
    }
}
