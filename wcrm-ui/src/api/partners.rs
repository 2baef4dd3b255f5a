//! Referral partner directory

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use wcrm_common::backend::Order;
use wcrm_common::models::{Contact, NewContact, PartnerProfile};
use wcrm_common::IndustryResolver;

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

const LIST_LIMIT: u32 = 100;

#[derive(Serialize)]
pub struct PartnerView {
    #[serde(flatten)]
    pub contact: Contact,
    pub profile: PartnerProfile,
}

#[derive(Serialize)]
pub struct PartnerListResponse {
    /// Industry partner taxonomy for the create form and tier badges
    pub partner_types: &'static [&'static str],
    pub partner_tiers: &'static [&'static str],
    pub partners: Vec<PartnerView>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// Partners sorted by name, with the industry's type and tier lists
pub async fn list_partners(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<PartnerListResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());

    let mut query = state
        .backend
        .from("contacts")
        .eq("tenant_id", tenant.tenant().id)
        .eq("contact_type", "partner")
        .order("full_name", Order::Ascending)
        .limit(LIST_LIMIT)
        .bearer(context.auth.access_token());

    if let Some(term) = params.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        query = query.ilike_any(&["full_name", "email"], term);
    }

    let contacts: Vec<Contact> = query.fetch().await?;

    let partners = contacts
        .into_iter()
        .map(|contact| {
            let profile = contact.partner_profile();
            PartnerView { contact, profile }
        })
        .collect();

    Ok(Json(PartnerListResponse {
        partner_types: resolver.partner_types(),
        partner_tiers: resolver.partner_tiers(),
        partners,
    }))
}

#[derive(Deserialize)]
pub struct PartnerForm {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub partner_type: Option<String>,
    #[serde(default)]
    pub partner_tier: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create a partner contact; partner metadata rides in `custom_fields`
pub async fn create_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<PartnerForm>,
) -> Result<Json<Contact>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let payload = NewContact {
        tenant_id: tenant.tenant().id,
        full_name: full_name.to_string(),
        email: form.email,
        phone: form.phone,
        address: None,
        city: None,
        state: None,
        zip: None,
        contact_type: "partner".into(),
        source: None,
        notes: form.notes,
        custom_fields: json!({
            "partner_type": form.partner_type,
            "partner_tier": form.partner_tier,
            "company": form.company,
        }),
    };

    let contact: Contact = state
        .backend
        .from("contacts")
        .bearer(context.auth.access_token())
        .insert_one(&payload)
        .await?;
    info!("Created partner {}", contact.id);
    Ok(Json(contact))
}
