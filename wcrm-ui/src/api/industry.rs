//! Resolved industry configuration for the active tenant

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use wcrm_common::IndustryResolver;

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

/// Everything the UI needs to adapt itself to the tenant's industry:
/// terminology, feature flags, pipeline stages, job types, and the
/// partner taxonomy.
pub async fn get_industry(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());
    let config = resolver.config();

    Ok(Json(json!({
        "id": config.id,
        "name": config.name,
        "terminology": config.terminology,
        "features": config.features,
        "job_types": resolver.job_types(),
        "pipeline_stages": resolver.pipeline_stages(),
        "billing_types": resolver.billing_types(),
        "compliance_requirements": resolver.compliance_requirements(),
        "custom_fields": resolver.custom_fields(),
        "voice_parsing": resolver.voice_parsing(),
        "partner_types": resolver.partner_types(),
        "partner_tiers": resolver.partner_tiers(),
    })))
}
