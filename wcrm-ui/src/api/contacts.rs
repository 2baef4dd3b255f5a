//! Contact list, search, create, update, and delete

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use wcrm_common::backend::Order;
use wcrm_common::models::{Contact, NewContact};

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

const LIST_LIMIT: u32 = 100;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// Newest-first contact list, optionally filtered by a substring match
/// on name, email, or phone
pub async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let mut query = state
        .backend
        .from("contacts")
        .eq("tenant_id", tenant.tenant().id)
        .order("created_at", Order::Descending)
        .limit(LIST_LIMIT)
        .bearer(context.auth.access_token());

    if let Some(term) = params.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        query = query.ilike_any(&["full_name", "email", "phone"], term);
    }

    Ok(Json(query.fetch().await?))
}

#[derive(Deserialize)]
pub struct ContactForm {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub contact_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ContactForm>,
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
        address: form.address,
        city: form.city,
        state: form.state,
        zip: form.zip,
        contact_type: form.contact_type.unwrap_or_else(|| "customer".into()),
        source: form.source,
        notes: form.notes,
        custom_fields: serde_json::Value::Null,
    };

    let contact: Contact = state
        .backend
        .from("contacts")
        .bearer(context.auth.access_token())
        .insert_one(&payload)
        .await?;
    info!("Created contact {}", contact.id);
    Ok(Json(contact))
}

pub async fn update_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(form): Json<ContactForm>,
) -> Result<Json<Contact>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let contact: Contact = state
        .backend
        .from("contacts")
        .eq("id", id)
        .eq("tenant_id", tenant.tenant().id)
        .bearer(context.auth.access_token())
        .update_one(&json!({
            "full_name": full_name,
            "email": form.email,
            "phone": form.phone,
            "address": form.address,
            "city": form.city,
            "state": form.state,
            "zip": form.zip,
            "source": form.source,
            "notes": form.notes,
        }))
        .await?;
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    state
        .backend
        .from("contacts")
        .eq("id", id)
        .eq("tenant_id", tenant.tenant().id)
        .bearer(context.auth.access_token())
        .delete()
        .await?;
    info!("Deleted contact {}", id);
    Ok(Json(json!({ "deleted": true })))
}
