//! Business settings

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use wcrm_common::context::TenantSession;
use wcrm_common::models::{Tenant, UserRole};

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

#[derive(Serialize)]
pub struct SettingsResponse {
    pub email: Option<String>,
    pub role: UserRole,
    pub tenant: Tenant,
}

/// Account and business settings for the active tenant
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SettingsResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    Ok(Json(SettingsResponse {
        email: context.auth.user().email.clone(),
        role: tenant.membership().role,
        tenant: tenant.tenant().clone(),
    }))
}

#[derive(Deserialize)]
pub struct BusinessUpdate {
    pub name: String,
}

/// Rename the business, then rebuild the tenant context so every page
/// sees the new name immediately
pub async fn update_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<BusinessUpdate>,
) -> Result<Json<Tenant>, ApiError> {
    let (id, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let name = update.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Business name is required"));
    }

    let renamed: Tenant = state
        .backend
        .from("tenants")
        .eq("id", tenant.tenant().id)
        .bearer(context.auth.access_token())
        .update_one(&json!({ "name": name }))
        .await?;

    let refreshed =
        TenantSession::load(&state.backend, &context.auth, &state.tenant_store).await?;
    state
        .sessions
        .update(id, |live| {
            live.tenant = refreshed;
        })
        .await;

    info!("Renamed tenant {} to {}", renamed.slug, renamed.name);
    Ok(Json(renamed))
}
