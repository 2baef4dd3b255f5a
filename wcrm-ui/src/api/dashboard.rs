//! Dashboard statistics and recent activity

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use wcrm_common::backend::Order;
use wcrm_common::models::{JobWithContact, ACTIVE_JOB_STATUSES};

use crate::api::{require_session, require_tenant, ApiError};
use crate::AppState;

#[derive(Deserialize)]
struct JobStatusTotal {
    status: String,
    actual_total: Option<f64>,
}

#[derive(Serialize)]
pub struct DashboardStats {
    pub total_contacts: i64,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_revenue: f64,
}

#[derive(Serialize)]
pub struct RecentJob {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub contact_name: Option<String>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_jobs: Vec<RecentJob>,
}

/// Contact count, job counts, revenue across all jobs, and the five most
/// recent jobs
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, ApiError> {
    let (_, context) = require_session(&state, &headers).await?;
    let tenant = require_tenant(&context)?;
    let tenant_id = tenant.tenant().id;
    let token = context.auth.access_token();

    let total_contacts = state
        .backend
        .from("contacts")
        .eq("tenant_id", tenant_id)
        .bearer(token)
        .count()
        .await?;

    let jobs: Vec<JobStatusTotal> = state
        .backend
        .from("jobs")
        .select("status, actual_total")
        .eq("tenant_id", tenant_id)
        .bearer(token)
        .fetch()
        .await?;

    let total_jobs = jobs.len() as i64;
    let active_jobs = jobs
        .iter()
        .filter(|j| ACTIVE_JOB_STATUSES.contains(&j.status.as_str()))
        .count() as i64;
    // Revenue sums actual_total over every job, not just completed ones
    let total_revenue: f64 = jobs.iter().filter_map(|j| j.actual_total).sum();

    let recent: Vec<JobWithContact> = state
        .backend
        .from("jobs")
        .select("*, contacts(full_name)")
        .eq("tenant_id", tenant_id)
        .order("created_at", Order::Descending)
        .limit(5)
        .bearer(token)
        .fetch()
        .await?;

    let recent_jobs = recent
        .into_iter()
        .map(|row| RecentJob {
            id: row.job.id,
            title: row.job.title,
            status: row.job.status,
            contact_name: row.contacts.map(|c| c.full_name),
        })
        .collect();

    Ok(Json(DashboardResponse {
        stats: DashboardStats { total_contacts, total_jobs, active_jobs, total_revenue },
        recent_jobs,
    }))
}
