//! HTTP API handlers for wcrm-ui

pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod industry;
pub mod jobs;
pub mod partners;
pub mod settings;
pub mod tenants;
pub mod ui;
pub mod voice;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use wcrm_common::context::TenantSession;
use wcrm_common::Error;

use crate::session::{session_id_from_headers, SessionContext};
use crate::AppState;

/// API error response: status code plus an inline message the UI renders
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_unauthorized() {
            StatusCode::UNAUTHORIZED
        } else {
            match &err {
                Error::Backend { status: 403, .. } => StatusCode::FORBIDDEN,
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                Error::Backend { .. } | Error::Http(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };
        // Backend and auth messages render inline on forms, so keep them
        // bare instead of wrapped in the variant's display prefix
        let message = match err {
            Error::Auth(message) => message,
            Error::Backend { message, .. } => message,
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Resolve the caller's live session from the cookie header
///
/// Returns 401 when the cookie is missing or the session is no longer
/// live (server restart, sign-out elsewhere).
pub async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Uuid, SessionContext), ApiError> {
    let id = session_id_from_headers(headers)
        .ok_or_else(|| ApiError::unauthorized("Not signed in"))?;
    let context = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::unauthorized("Session expired; sign in again"))?;
    Ok((id, context))
}

/// The caller's tenant session, or 401 when the user has no memberships
pub fn require_tenant(context: &SessionContext) -> Result<&TenantSession, ApiError> {
    context
        .tenant
        .as_ref()
        .ok_or_else(|| ApiError::unauthorized("No business is linked to this account"))
}
