//! wcrm-ui library - WorkflowCRM web application
//!
//! Serves the embedded single-page UI and the JSON API behind it. All
//! domain data lives in the hosted backend; this process holds only live
//! session contexts and the locally persisted tenant selection.

use axum::Router;
use tower_http::trace::TraceLayer;

use wcrm_common::backend::BackendClient;
use wcrm_common::store::TenantSelectionStore;

pub mod api;
pub mod session;

use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Hosted-backend client (tables + auth)
    pub backend: BackendClient,
    /// Live session contexts keyed by cookie
    pub sessions: SessionStore,
    /// Locally persisted tenant selection
    pub tenant_store: TenantSelectionStore,
    /// Public origin used in password-reset redirect links
    pub public_url: String,
}

impl AppState {
    pub fn new(backend: BackendClient, tenant_store: TenantSelectionStore, public_url: String) -> Self {
        Self {
            backend,
            sessions: SessionStore::default(),
            tenant_store,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Build application router
///
/// `/health` and the static UI are public; everything under `/api` except
/// the auth endpoints requires a session cookie (checked per handler, so
/// error responses can carry form-friendly messages).
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let api = Router::new()
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/signup", post(api::auth::signup))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/reset", post(api::auth::reset_password))
        .route("/api/auth/recovery", post(api::auth::recover_session))
        .route("/api/auth/password", post(api::auth::update_password))
        .route("/api/tenants", get(api::tenants::list_tenants))
        .route("/api/tenants/switch", post(api::tenants::switch_tenant))
        .route("/api/industry", get(api::industry::get_industry))
        .route("/api/dashboard", get(api::dashboard::get_dashboard))
        .route(
            "/api/contacts",
            get(api::contacts::list_contacts).post(api::contacts::create_contact),
        )
        .route(
            "/api/contacts/:id",
            put(api::contacts::update_contact).delete(api::contacts::delete_contact),
        )
        .route("/api/jobs", get(api::jobs::list_jobs).post(api::jobs::create_job))
        .route("/api/jobs/:id/status", axum::routing::patch(api::jobs::change_job_status))
        .route(
            "/api/partners",
            get(api::partners::list_partners).post(api::partners::create_partner),
        )
        .route(
            "/api/voice/entries",
            get(api::voice::list_entries).post(api::voice::create_entry),
        )
        .route("/api/voice/jobs", get(api::voice::list_active_jobs))
        .route("/api/settings", get(api::settings::get_settings))
        .route("/api/settings/business", put(api::settings::update_business));

    let public = Router::new()
        .route("/", get(api::ui::serve_index))
        .route("/reset-password", get(api::ui::serve_index))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .route("/static/wcrm.css", get(api::ui::serve_css))
        .merge(api::health::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
