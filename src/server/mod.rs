//! HTTP 接口
//!
//! - `POST /generate`, `POST /api/generate`: 生成活动
//! - `GET /`, `GET /health`: 健康检查
//! - `GET /api/campaigns/{user_id}`: 查询用户的历史活动

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::PracharError;
use crate::orchestrator::{CampaignOrchestrator, CampaignRecord, GenerateRequest};

pub const SERVICE_NAME: &str = "Prachar.ai Creative Director";

#[derive(Clone)]
struct AppState {
    orchestrator: Arc<CampaignOrchestrator>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct CampaignList {
    user_id: String,
    campaigns: Vec<CampaignRecord>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn router(orchestrator: Arc<CampaignOrchestrator>) -> Router {
    let state = AppState { orchestrator };
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/generate", post(generate))
        .route("/api/generate", post(generate))
        .route("/api/campaigns/{user_id}", get(list_campaigns))
        .with_state(state)
}

pub async fn run_server(orchestrator: Arc<CampaignOrchestrator>, listen: SocketAddr) -> anyhow::Result<()> {
    let app = router(orchestrator);
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .context("bind server listener failed")?;
    tracing::info!(%listen, "prachar server listening");
    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "agent": "operational",
        "endpoints": ["/generate", "/api/generate", "/api/campaigns/{user_id}"],
    }))
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<CampaignRecord>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected request body");
        error_body(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
    })?;

    let record = state
        .orchestrator
        .handle(&request)
        .await
        .map_err(map_error)?;
    Ok(Json(record))
}

async fn list_campaigns(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CampaignList>, ApiError> {
    let campaigns = state
        .orchestrator
        .campaigns_for_user(&user_id)
        .await
        .map_err(map_error)?;
    Ok(Json(CampaignList { user_id, campaigns }))
}

fn error_body(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

fn map_error(err: PracharError) -> ApiError {
    let status = match &err {
        PracharError::Validation(_) => StatusCode::BAD_REQUEST,
        PracharError::Store(_) | PracharError::Config(_) | PracharError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PracharError::RateLimited(_)
        | PracharError::Upstream { .. }
        | PracharError::Timeout { .. }
        | PracharError::Serialization(_) => StatusCode::BAD_GATEWAY,
    };
    let message = match &err {
        PracharError::Validation(message) => message.clone(),
        other => other.to_string(),
    };
    error_body(status, err.class(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let (status, Json(body)) = map_error(PracharError::Validation("Missing required fields: goal and user_id".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "validation");
        assert_eq!(body.message, "Missing required fields: goal and user_id");
    }

    #[test]
    fn strict_errors_map_to_gateway_or_internal() {
        let (status, _) = map_error(PracharError::upstream("planner", "boom"));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, _) = map_error(PracharError::Store("down".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
