//! API integration tests.
//!
//! These tests drive the full application router against an in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use crimereport_api::{AppState, app};
use crimereport_common::{SharedStore, config::LatencyConfig};
use crimereport_core::{
    DashboardService, LocalReportBackend, MockIdentityProvider, ReportBackend, ReportService,
    SessionManager,
};
use crimereport_db::entities::ReportStatus;
use crimereport_db::repositories::ReportRepository;
use crimereport_db::test_utils::{ReportFixture, memory_store, store_with_reports};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Create test app state over the given store.
async fn create_test_state(store: SharedStore) -> AppState {
    let backend: Arc<dyn ReportBackend> = Arc::new(LocalReportBackend::new(
        ReportRepository::new(store.clone()),
        LatencyConfig::none(),
    ));
    let session = SessionManager::initialize(store, Arc::new(MockIdentityProvider::new()))
        .await
        .unwrap();

    AppState {
        session,
        report_service: ReportService::new(backend.clone()),
        dashboard_service: DashboardService::new(backend),
    }
}

/// Create the test router.
async fn create_test_router(store: SharedStore) -> Router {
    app(create_test_state(store).await)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().uri(uri).method(method);
    let body = match body {
        Some(value) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn anonymous_theft() -> Value {
    json!({
        "crimeType": "Theft/Burglary",
        "incidentDate": "2025-01-01",
        "incidentTime": "",
        "location": "Main St",
        "description": "Bicycle taken from the rack",
        "witnesses": "",
        "suspect": "",
        "evidence": "",
        "anonymous": true,
        "contactName": "",
        "contactPhone": "",
        "contactEmail": ""
    })
}

async fn login(app: &Router) {
    let response = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_meta_endpoint() {
    let app = create_test_router(memory_store()).await;

    let response = send(&app, "GET", "/api/meta", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["home"]["title"], "Secure Crime Reporting System");
    assert_eq!(body["data"]["user"], Value::Null);
}

#[tokio::test]
async fn test_emergency_and_crime_types() {
    let app = create_test_router(memory_store()).await;

    let body = json_body(send(&app, "GET", "/api/emergency", None).await).await;
    assert_eq!(body["data"]["emergencyNumber"], "100");

    let body = json_body(send(&app, "GET", "/api/crime-types", None).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_submit_anonymous_report_then_track() {
    let app = create_test_router(memory_store()).await;

    let mut form = anonymous_theft();
    form["description"] = json!("x");
    let response = send(&app, "POST", "/api/reports", Some(form)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    let id = body["data"]["report"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("CR") && id.len() == 8);
    assert_eq!(body["data"]["report"]["status"], "submitted");
    assert_eq!(body["data"]["next"]["route"], "/track");
    assert_eq!(body["data"]["next"]["justSubmitted"], true);

    let response = send(
        &app,
        "GET",
        &format!("/api/reports/{id}?justSubmitted=true"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let report = &body["data"]["report"];
    assert_eq!(report["id"], id.as_str());
    assert_eq!(report["anonymous"], true);
    assert_eq!(report["crimeType"], "Theft/Burglary");
    assert_eq!(report["incidentDate"], "2025-01-01");
    assert_eq!(report["location"], "Main St");
    assert_eq!(report["description"], "x");
    assert_eq!(body["data"]["justSubmitted"], true);
    assert_eq!(
        body["data"]["timeline"][0]["message"],
        "Report submitted successfully"
    );

    let again = json_body(send(&app, "GET", &format!("/api/reports/{id}"), None).await).await;
    assert_eq!(again["data"]["report"], *report);
}

#[tokio::test]
async fn test_submit_invalid_report_returns_field_errors() {
    let app = create_test_router(memory_store()).await;

    let mut form = anonymous_theft();
    form["anonymous"] = json!(false);
    form["location"] = json!("");

    let response = send(&app, "POST", "/api/reports", Some(form)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = &body["error"]["fields"];
    assert_eq!(fields["location"], "Location is required");
    assert_eq!(fields["contactName"], "Name is required for non-anonymous reports");
    assert_eq!(fields["contactPhone"], "Phone or email is required");
    assert_eq!(fields["contactEmail"], "Phone or email is required");
}

#[tokio::test]
async fn test_validate_endpoint_does_not_store() {
    let store = memory_store();
    let app = create_test_router(store.clone()).await;

    let body = json_body(send(&app, "POST", "/api/reports/validate", Some(anonymous_theft())).await).await;
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(ReportRepository::new(store).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_track_by_body() {
    let app = create_test_router(store_with_reports(&[
        ReportFixture::new("CR123456").status(ReportStatus::UnderReview).build(),
    ]))
    .await;

    let response = send(&app, "POST", "/api/track", Some(json!({"reportId": " CR123456 "}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["report"]["status"], "under_review");
    assert_eq!(body["data"]["progress"][1]["current"], true);
}

#[tokio::test]
async fn test_track_blank_and_unknown() {
    let app = create_test_router(memory_store()).await;

    let response = send(&app, "POST", "/api/track", Some(json!({"reportId": "  "}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["fields"]["reportId"], "Please enter a report ID");

    let response = send(&app, "GET", "/api/reports/CR000000", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "REPORT_NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        "Report not found. Please check your report ID and try again."
    );
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let app = create_test_router(memory_store()).await;

    let response = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["error"]["redirect"], "/login");
}

#[tokio::test]
async fn test_login_failure() {
    let app = create_test_router(memory_store()).await;

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "alice@example.com", "password": "12345"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Invalid credentials");

    let body = json_body(send(&app, "GET", "/api/auth/me", None).await).await;
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_login_submit_and_dashboard() {
    let app = create_test_router(memory_store()).await;
    login(&app).await;

    let body = json_body(send(&app, "GET", "/api/auth/me", None).await).await;
    assert_eq!(body["data"]["name"], "alice");

    let mut named = anonymous_theft();
    named["anonymous"] = json!(false);
    named["contactName"] = json!("Alice");
    named["contactEmail"] = json!("alice@example.com");
    let response = send(&app, "POST", "/api/reports", Some(named)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "POST", "/api/reports", Some(anonymous_theft())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["stats"]["total"], 1);
    assert_eq!(body["data"]["stats"]["submitted"], 1);
    assert_eq!(body["data"]["reports"][0]["crimeType"], "Theft/Burglary");
}

#[tokio::test]
async fn test_register_validation_and_success() {
    let app = create_test_router(memory_store()).await;

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "Alice",
            "email": "alice@example",
            "password": "secret1",
            "confirmPassword": "secret2"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["fields"]["email"], "Email is invalid");
    assert_eq!(body["error"]["fields"]["confirmPassword"], "Passwords do not match");

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret1",
            "confirmPassword": "secret1"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["user"]["name"], "Alice");
    assert_eq!(body["data"]["next"]["route"], "/dashboard");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = create_test_router(memory_store()).await;
    login(&app).await;

    let response = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["next"]["route"], "/");

    let response = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_is_restored_from_store() {
    let store = memory_store();
    login(&create_test_router(store.clone()).await).await;

    let restarted = create_test_router(store).await;
    let body = json_body(send(&restarted, "GET", "/api/auth/me", None).await).await;
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router(memory_store()).await;

    let response = send(&app, "GET", "/api/nonexistent", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_json_returns_error() {
    let app = create_test_router(memory_store()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"].as_str().unwrap().starts_with("Bad request"));
}

#[tokio::test]
async fn test_missing_content_type_returns_error_envelope() {
    let app = create_test_router(memory_store()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/login")
                .method("POST")
                .body(Body::from(r#"{"email":"a@b.c","password":"secret1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
