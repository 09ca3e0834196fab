use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use prachar::orchestrator::MISSING_FIELDS;
use prachar::server::{router, SERVICE_NAME};
use prachar::{CampaignOrchestrator, Matcher, MemoryCampaignStore};

fn app() -> Router {
    let orchestrator = CampaignOrchestrator::builder()
        .store(Arc::new(MemoryCampaignStore::new()))
        .build();
    router(Arc::new(orchestrator))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_endpoints_report_healthy() {
    let app = app();
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], SERVICE_NAME);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent"], "operational");
}

#[tokio::test]
async fn generate_returns_full_record() {
    let app = app();
    for uri in ["/generate", "/api/generate"] {
        let payload = json!({"goal": "Hype my college tech fest", "user_id": "u42"}).to_string();
        let (status, body) = send(&app, post_json(uri, &payload)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");

        let entry = Matcher::default().select_campaign("tech fest").clone();
        assert_eq!(body["user_id"], "u42");
        assert_eq!(body["goal"], "Hype my college tech fest");
        assert_eq!(body["status"], "completed");
        assert_eq!(body["plan"]["hook"], entry.plan.hook.as_str());
        assert_eq!(body["captions"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["image_url"], entry.image_url.as_str());
        assert!(body["campaign_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(body["created_at"].is_string());
    }
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let app = app();
    for payload in [
        json!({"goal": "tech fest"}),
        json!({"user_id": "u1"}),
        json!({"goal": "", "user_id": "u1"}),
    ] {
        let (status, body) = send(&app, post_json("/generate", &payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], MISSING_FIELDS);
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, post_json("/generate", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn campaigns_are_listed_per_user() {
    let app = app();
    let payload = json!({"goal": "hackathon", "user_id": "alice"}).to_string();
    let (_, created) = send(&app, post_json("/api/generate", &payload)).await;

    let (status, body) = send(&app, get("/api/campaigns/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "alice");
    assert_eq!(body["campaigns"], json!([created]));

    let (_, body) = send(&app, get("/api/campaigns/nobody")).await;
    assert_eq!(body["campaigns"], json!([]));
}
