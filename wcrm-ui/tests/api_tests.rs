//! Integration tests for the wcrm-ui API
//!
//! A small mock of the hosted backend (auth token endpoint plus the
//! `tenant_users` table) runs on a local port so the sign-in flow can be
//! exercised end to end: login, session cookie, industry resolution, and
//! tenant listing.

use axum::body::Body;
use axum::extract::Query;
use axum::http::{header, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::util::ServiceExt; // for `oneshot`

use wcrm_common::backend::BackendClient;
use wcrm_common::config::BackendConfig;
use wcrm_common::store::TenantSelectionStore;
use wcrm_ui::{build_router, AppState};

const TENANT_ID: &str = "7b1c9c2e-64c2-4f31-8a3d-2f9f4f0a9b11";
const USER_ID: &str = "c1a2b3d4-e5f6-4a1b-9c8d-0e1f2a3b4c5d";

/// Mock hosted backend: password grant plus the membership query both the
/// auto-provisioning check and the tenant session loader issue
fn mock_backend_router() -> Router {
    async fn token() -> Json<Value> {
        Json(json!({
            "access_token": "test-access-token",
            "refresh_token": "test-refresh-token",
            "expires_in": 3600,
            "user": { "id": USER_ID, "email": "owner@example.com" }
        }))
    }

    async fn tenant_users(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let membership = json!({
            "id": "5f0e4d3c-2b1a-4987-8765-4321fedcba09",
            "tenant_id": TENANT_ID,
            "user_id": USER_ID,
            "role": "owner",
            "hourly_rate": 85.0,
            "is_active": true,
            "created_at": "2026-01-05T12:00:00Z",
            "updated_at": "2026-01-05T12:00:00Z",
        });
        // The session loader embeds the tenant; the provisioning check
        // selects only tenant_id and ignores the extra fields
        let row = if params.get("select").map(|s| s.contains("tenants")).unwrap_or(false) {
            let mut row = membership;
            row["tenants"] = json!({
                "id": TENANT_ID,
                "name": "Summit Mortgage",
                "slug": "summit-mortgage",
                "industry": "mortgage",
                "subscription_tier": "starter",
                "is_active": true,
                "created_at": "2026-01-05T12:00:00Z",
                "updated_at": "2026-01-05T12:00:00Z",
            });
            row
        } else {
            membership
        };
        Json(json!([row]))
    }

    async fn user() -> Json<Value> {
        Json(json!({ "id": USER_ID, "email": "owner@example.com" }))
    }

    async fn contacts() -> impl axum::response::IntoResponse {
        ([(header::CONTENT_RANGE, "0-2/3")], Json(json!([])))
    }

    async fn jobs(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let embedded = params.get("select").map(|s| s.contains("contacts")).unwrap_or(false);
        if embedded {
            Json(json!([{
                "id": 2,
                "tenant_id": TENANT_ID,
                "title": "Refinance application",
                "status": "in_progress",
                "created_at": "2026-02-01T09:00:00Z",
                "updated_at": "2026-02-01T09:00:00Z",
                "contacts": { "full_name": "Pat Jones" }
            }]))
        } else {
            Json(json!([
                { "status": "in_progress", "actual_total": 500.0 },
                { "status": "completed", "actual_total": 250.0 }
            ]))
        }
    }

    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user).put(user))
        .route("/rest/v1/tenant_users", get(tenant_users))
        .route("/rest/v1/contacts", get(contacts))
        .route("/rest/v1/jobs", get(jobs))
}

/// Start the mock backend on an ephemeral port and return its base URL
async fn spawn_mock_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_backend_router()).await.unwrap();
    });
    format!("http://{}", addr)
}

fn setup_app(backend_url: &str, data_folder: &std::path::Path) -> Router {
    let config = BackendConfig {
        url: backend_url.to_string(),
        anon_key: "test-anon-key".to_string(),
    };
    let backend = BackendClient::new(&config).expect("backend client");
    let tenant_store = TenantSelectionStore::new(data_folder);
    let state = AppState::new(backend, tenant_store, "http://127.0.0.1:5780".to_string());
    build_router(state)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app("http://127.0.0.1:9", dir.path());

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "wcrm-ui");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn index_and_static_assets_are_public() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app("http://127.0.0.1:9", dir.path());

    for uri in ["/", "/reset-password", "/static/app.js", "/static/wcrm.css"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }
}

#[tokio::test]
async fn api_requires_session_cookie() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app("http://127.0.0.1:9", dir.path());

    for uri in [
        "/api/industry",
        "/api/tenants",
        "/api/dashboard",
        "/api/contacts",
        "/api/jobs",
        "/api/partners",
        "/api/voice/entries",
        "/api/settings",
    ] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].is_string(), "GET {} should carry an error message", uri);
    }
}

#[tokio::test]
async fn unknown_session_cookie_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app("http://127.0.0.1:9", dir.path());

    let request = Request::builder()
        .method("GET")
        .uri("/api/industry")
        .header(header::COOKIE, "wcrm_session=0b1a2c3d-4e5f-4678-9abc-def012345678")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_establishes_session_and_resolves_industry() {
    let backend_url = spawn_mock_backend().await;
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app(&backend_url, dir.path());

    let login = post_json(
        "/api/auth/login",
        json!({ "email": "owner@example.com", "password": "secret-pass" }),
    );
    let response = app.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("wcrm_session="));

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["email"], "owner@example.com");
    assert_eq!(body["tenant"]["name"], "Summit Mortgage");

    // Industry resolution follows the tenant's configured industry
    let cookie_value = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .method("GET")
        .uri("/api/industry")
        .header(header::COOKIE, &cookie_value)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let industry = extract_json(response.into_body()).await;
    assert_eq!(industry["id"], "mortgage");
    assert_eq!(industry["terminology"]["contact"], "Borrower");
    assert_eq!(
        industry["partner_types"],
        json!(["realtor", "title_company", "appraiser", "insurance_agent", "financial_planner"])
    );

    // Tenant listing reflects the single membership
    let request = Request::builder()
        .method("GET")
        .uri("/api/tenants")
        .header(header::COOKIE, &cookie_value)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tenants = extract_json(response.into_body()).await;
    assert_eq!(tenants["active"], TENANT_ID);
    assert_eq!(tenants["tenants"][0]["slug"], "summit-mortgage");
}

#[tokio::test]
async fn dashboard_aggregates_job_stats() {
    let backend_url = spawn_mock_backend().await;
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app(&backend_url, dir.path());

    let login = post_json(
        "/api/auth/login",
        json!({ "email": "owner@example.com", "password": "secret-pass" }),
    );
    let response = app.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method("GET")
        .uri("/api/dashboard")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["stats"]["total_contacts"], 3);
    assert_eq!(body["stats"]["total_jobs"], 2);
    assert_eq!(body["stats"]["active_jobs"], 1);
    // Revenue sums actual_total across every job regardless of status
    assert_eq!(body["stats"]["total_revenue"], 750.0);
    assert_eq!(body["recent_jobs"][0]["title"], "Refinance application");
    assert_eq!(body["recent_jobs"][0]["contact_name"], "Pat Jones");
}

#[tokio::test]
async fn recovery_token_allows_password_update_without_login() {
    let backend_url = spawn_mock_backend().await;
    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app(&backend_url, dir.path());

    // The reset email link carries an access token in its fragment; the UI
    // exchanges it for a session cookie before showing the reset form
    let recover = post_json(
        "/api/auth/recovery",
        json!({ "access_token": "recovery-token-from-email" }),
    );
    let response = app.clone().oneshot(recover).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("recovery should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["email"], "owner@example.com");

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/password")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "password": "brand-new-password" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["updated"], true);
}

#[tokio::test]
async fn login_with_wrong_password_reports_backend_message() {
    // Mock that rejects the password grant the way the hosted auth does
    async fn reject() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "Invalid login credentials" })),
        )
    }
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let router = Router::new().route("/auth/v1/token", post(reject));
        axum::serve(listener, router).await.unwrap();
    });

    let dir = tempfile::TempDir::new().unwrap();
    let app = setup_app(&format!("http://{}", addr), dir.path());

    let login = post_json(
        "/api/auth/login",
        json!({ "email": "owner@example.com", "password": "wrong" }),
    );
    let response = app.oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid login credentials");
}
