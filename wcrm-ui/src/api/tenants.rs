//! Tenant membership listing and switching

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use wcrm_common::models::Tenant;

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

#[derive(Serialize)]
pub struct TenantListResponse {
    pub tenants: Vec<Tenant>,
    pub active: Uuid,
}

/// All tenants the user belongs to plus the active selection
pub async fn list_tenants(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TenantListResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    Ok(Json(TenantListResponse {
        tenants: tenant.tenants().to_vec(),
        active: tenant.tenant().id,
    }))
}

#[derive(Deserialize)]
pub struct SwitchRequest {
    pub tenant_id: Uuid,
}

/// Switch the active tenant. The selection persists locally so the next
/// sign-in lands on the same tenant.
pub async fn switch_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SwitchRequest>,
) -> Result<Json<Tenant>, ApiError> {
    let (id, _) = require_session(&state, &headers).await?;

    let mut outcome = Err(ApiError::unauthorized("No business is linked to this account"));
    let live = state
        .sessions
        .update(id, |context| {
            outcome = match context.tenant.as_mut() {
                Some(tenant) => tenant
                    .switch(request.tenant_id, &state.tenant_store)
                    .map(|()| tenant.tenant().clone())
                    .map_err(ApiError::from),
                None => Err(ApiError::unauthorized("No business is linked to this account")),
            };
        })
        .await;
    if !live {
        return Err(ApiError::unauthorized("Session expired; sign in again"));
    }

    let tenant = outcome?;
    info!("Switched active tenant to {}", tenant.slug);
    Ok(Json(tenant))
}
