//! Sign-in, sign-up, sign-out, and password management

use axum::extract::State;
use axum::http::{header::SET_COOKIE, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use wcrm_common::backend::{Session, SignUpOutcome};
use wcrm_common::context::{ensure_user_has_tenant, AuthSession, TenantSession};
use wcrm_common::models::Tenant;

use crate::api::{require_session, ApiError};
use crate::session::{clear_session_cookie, session_cookie, SessionContext};
use crate::AppState;

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub email: Option<String>,
    pub tenant: Option<Tenant>,
}

/// Password sign-in. Establishes the session cookie and reports the
/// active tenant (auto-created for a first sign-in with no membership).
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, ApiError> {
    let session = state
        .backend
        .auth()
        .sign_in_with_password(&credentials.email, &credentials.password)
        .await?;
    let auth = AuthSession::new(session);

    ensure_user_has_tenant(&state.backend, &auth).await?;
    let tenant = TenantSession::load(&state.backend, &auth, &state.tenant_store).await?;

    let body = LoginResponse {
        email: auth.user().email.clone(),
        tenant: tenant.as_ref().map(|t| t.tenant().clone()),
    };
    let id = state.sessions.insert(SessionContext { auth, tenant }).await;
    info!("User signed in");

    let mut response = Json(body).into_response();
    let cookie = session_cookie(id)
        .parse()
        .map_err(|_| ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: "invalid session cookie".into() })?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

#[derive(Serialize)]
pub struct SignupResponse {
    /// True when the backend requires email confirmation before sign-in
    pub confirmation_required: bool,
    pub tenant: Option<Tenant>,
}

/// Create an account. When the backend issues a session immediately the
/// response also signs the user in, same as `login`.
pub async fn signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, ApiError> {
    if credentials.password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }

    let outcome = state
        .backend
        .auth()
        .sign_up(&credentials.email, &credentials.password)
        .await?;

    let session = match outcome {
        SignUpOutcome::ConfirmationRequired => {
            return Ok(Json(SignupResponse { confirmation_required: true, tenant: None })
                .into_response());
        }
        SignUpOutcome::SignedIn(session) => session,
    };

    let auth = AuthSession::new(session);
    ensure_user_has_tenant(&state.backend, &auth).await?;
    let tenant = TenantSession::load(&state.backend, &auth, &state.tenant_store).await?;

    let body = SignupResponse {
        confirmation_required: false,
        tenant: tenant.as_ref().map(|t| t.tenant().clone()),
    };
    let id = state.sessions.insert(SessionContext { auth, tenant }).await;

    let mut response = Json(body).into_response();
    let cookie = session_cookie(id)
        .parse()
        .map_err(|_| ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: "invalid session cookie".into() })?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// Drop the local session and revoke the backend tokens. Always clears
/// the cookie, even when the backend call fails.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Ok((id, context)) = require_session(&state, &headers).await {
        state.sessions.remove(id).await;
        if let Err(e) = state.backend.auth().sign_out(context.auth.access_token()).await {
            warn!("Backend sign-out failed: {}", e);
        }
    }

    let mut response = Json(serde_json::json!({ "signed_out": true })).into_response();
    if let Ok(value) = clear_session_cookie().parse() {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Send a password-reset email linking back to this app
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let redirect = format!("{}/reset-password", state.public_url);
    state
        .backend
        .auth()
        .reset_password_for_email(&request.email, &redirect)
        .await?;
    Ok(Json(serde_json::json!({ "sent": true })))
}

#[derive(Deserialize)]
pub struct RecoveryToken {
    pub access_token: String,
}

/// Establish a session from the access token carried by a password-reset
/// email link, so the reset form can set a new password without the old
/// credentials
pub async fn recover_session(
    State(state): State<AppState>,
    Json(token): Json<RecoveryToken>,
) -> Result<Response, ApiError> {
    let user = state.backend.auth().get_user(&token.access_token).await?;
    let auth = AuthSession::new(Session {
        access_token: token.access_token,
        refresh_token: None,
        expires_in: None,
        user,
    });
    let tenant = TenantSession::load(&state.backend, &auth, &state.tenant_store).await?;

    let body = serde_json::json!({ "email": auth.user().email.clone() });
    let id = state.sessions.insert(SessionContext { auth, tenant }).await;
    info!("Established recovery session");

    let mut response = Json(body).into_response();
    let cookie = session_cookie(id)
        .parse()
        .map_err(|_| ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: "invalid session cookie".into() })?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

#[derive(Deserialize)]
pub struct PasswordUpdate {
    pub password: String,
}

/// Set a new password for the signed-in user (the recovery link signs the
/// user in with a short-lived token first)
pub async fn update_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<PasswordUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if update.password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }

    let (_, context) = require_session(&state, &headers).await?;
    state
        .backend
        .auth()
        .update_password(context.auth.access_token(), &update.password)
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}
