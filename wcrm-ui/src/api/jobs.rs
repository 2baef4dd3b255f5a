//! Job pipeline board: list by stage, create, and move between stages

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use wcrm_common::backend::Order;
use wcrm_common::models::{Job, JobWithContact, NewJob};
use wcrm_common::IndustryResolver;

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

#[derive(Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub contact_name: Option<String>,
}

#[derive(Serialize)]
pub struct JobListResponse {
    /// Pipeline stage order the board renders columns in
    pub stages: &'static [String],
    pub jobs: Vec<JobView>,
}

/// All jobs for the board, newest first, with the industry's stage order
pub async fn list_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<JobListResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());

    let rows: Vec<JobWithContact> = state
        .backend
        .from("jobs")
        .select("*, contacts(full_name)")
        .eq("tenant_id", tenant.tenant().id)
        .order("created_at", Order::Descending)
        .bearer(context.auth.access_token())
        .fetch()
        .await?;

    let jobs = rows
        .into_iter()
        .map(|row| JobView {
            job: row.job,
            contact_name: row.contacts.map(|c| c.full_name),
        })
        .collect();

    Ok(Json(JobListResponse { stages: resolver.pipeline_stages(), jobs }))
}

#[derive(Deserialize)]
pub struct JobForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub contact_id: Option<i64>,
    #[serde(default)]
    pub estimated_total: Option<f64>,
}

/// Create a job. A missing or unknown status lands on the industry's
/// first pipeline stage.
pub async fn create_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<JobForm>,
) -> Result<Json<Job>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());

    let title = form.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let stages = resolver.pipeline_stages();
    let status = form
        .status
        .filter(|s| stages.iter().any(|stage| stage == s))
        .or_else(|| stages.first().cloned())
        .unwrap_or_else(|| "new".into());

    let payload = NewJob {
        tenant_id: tenant.tenant().id,
        title: title.to_string(),
        description: form.description,
        status,
        job_type: form.job_type,
        scheduled_date: form.scheduled_date,
        contact_id: form.contact_id,
        estimated_total: form.estimated_total,
    };

    let job: Job = state
        .backend
        .from("jobs")
        .bearer(context.auth.access_token())
        .insert_one(&payload)
        .await?;
    info!("Created job {}", job.id);
    Ok(Json(job))
}

#[derive(Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Move a job to another pipeline stage. The stage must belong to the
/// tenant's industry pipeline.
pub async fn change_job_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(change): Json<StatusChange>,
) -> Result<Json<Job>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let resolver = IndustryResolver::for_tenant(tenant.tenant());

    let known = resolver.pipeline_stages().iter().any(|s| s == &change.status)
        || change.status == "completed"
        || change.status == "cancelled";
    if !known {
        return Err(ApiError::bad_request(format!("Unknown stage '{}'", change.status)));
    }

    let job: Job = state
        .backend
        .from("jobs")
        .eq("id", id)
        .eq("tenant_id", tenant.tenant().id)
        .bearer(context.auth.access_token())
        .update_one(&json!({ "status": change.status }))
        .await?;
    Ok(Json(job))
}
