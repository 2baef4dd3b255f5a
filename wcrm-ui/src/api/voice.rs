//! Voice field-note entry: transcript parsing and generated billing items

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use wcrm_common::backend::Order;
use wcrm_common::industry::VoiceParsingConfig;
use wcrm_common::models::{BillingItem, NewBillingItem, VoiceEntry, VoiceEntryWithJob};
use wcrm_common::voice::parse_transcript;
use wcrm_common::IndustryResolver;

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

const RECENT_LIMIT: u32 = 10;

#[derive(Serialize)]
pub struct VoiceEntryView {
    #[serde(flatten)]
    pub entry: VoiceEntry,
    pub job_title: Option<String>,
}

/// Most recent voice entries with their job titles
pub async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<VoiceEntryView>>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let rows: Vec<VoiceEntryWithJob> = state
        .backend
        .from("voice_entries")
        .select("*, jobs(title)")
        .eq("tenant_id", tenant.tenant().id)
        .order("created_at", Order::Descending)
        .limit(RECENT_LIMIT)
        .bearer(context.auth.access_token())
        .fetch()
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| VoiceEntryView {
                entry: row.entry,
                job_title: row.jobs.map(|j| j.title),
            })
            .collect(),
    ))
}

#[derive(Deserialize, Serialize)]
pub struct ActiveJob {
    pub id: i64,
    pub title: String,
    pub status: String,
}

/// Jobs a voice entry can attach to (scheduled or underway)
pub async fn list_active_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ActiveJob>>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;

    let jobs: Vec<ActiveJob> = state
        .backend
        .from("jobs")
        .select("id, title, status")
        .eq("tenant_id", tenant.tenant().id)
        .in_list("status", &["scheduled", "in_progress"])
        .order("scheduled_date", Order::Ascending)
        .limit(20)
        .bearer(context.auth.access_token())
        .fetch()
        .await?;

    Ok(Json(jobs))
}

#[derive(Deserialize)]
pub struct VoiceEntryForm {
    pub transcript: String,
    #[serde(default)]
    pub job_id: Option<i64>,
}

#[derive(Serialize)]
pub struct VoiceEntryResponse {
    pub entry: VoiceEntry,
    pub billing_items: Vec<BillingItem>,
}

/// Parse a transcript, store the entry as processed, and generate billing
/// items against the selected job
pub async fn create_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<VoiceEntryForm>,
) -> Result<Json<VoiceEntryResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());

    let transcript = form.transcript.trim();
    if transcript.is_empty() {
        return Err(ApiError::bad_request("Transcript is required"));
    }

    // Industries without a voice workflow still accept entries; with no
    // keyword lists everything lands in job notes.
    let fallback = VoiceParsingConfig::default();
    let config = resolver.voice_parsing().unwrap_or(&fallback);
    let hourly_rate = tenant.membership().hourly_rate;
    let parsed = parse_transcript(config, transcript, hourly_rate);

    let tenant_id = tenant.tenant().id;
    let token = context.auth.access_token();

    let entry: VoiceEntry = state
        .backend
        .from("voice_entries")
        .bearer(token)
        .insert_one(&json!({
            "tenant_id": tenant_id,
            "job_id": form.job_id,
            "user_id": context.auth.user().id,
            "raw_transcription": transcript,
            "status": "parsed",
            "parsed_data": &parsed,
            "billing_items_generated": &parsed.billing_items,
            "tasks_generated": &parsed.tasks,
            "processed_at": Utc::now(),
        }))
        .await?;

    let mut billing_items = Vec::new();
    if let Some(job_id) = form.job_id {
        for item in &parsed.billing_items {
            let payload = NewBillingItem {
                tenant_id,
                job_id,
                voice_entry_id: Some(entry.id),
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total,
                item_type: item.item_type.clone(),
            };
            let created: BillingItem = state
                .backend
                .from("billing_items")
                .bearer(token)
                .insert_one(&payload)
                .await?;
            billing_items.push(created);
        }
    }

    info!(
        "Processed voice entry {} ({} billing items, {} tasks)",
        entry.id,
        billing_items.len(),
        parsed.tasks.len()
    );
    Ok(Json(VoiceEntryResponse { entry, billing_items }))
}
