use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use mindlens_core::upstream::CompletionClient;

use crate::auth::TokenService;
use crate::error::ApiError;
use crate::store::UserStore;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

/// Upload ceiling for photo analysis (and the JSON bodies, which are far
/// smaller anyway).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub model: Arc<dyn CompletionClient>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/photo/analyze", post(handlers::photo::analyze))
        .route("/api/mbti/analyze", post(handlers::mbti::analyze))
        .route("/api/mbti/quiz", post(handlers::mbti::quiz))
        .route("/api/chat/analyze", post(handlers::chat::analyze))
        .route("/api/chat/analyze-kakao", post(handlers::chat::analyze_kakao))
        .route("/api/brainstorm/ideas", post(handlers::brainstorm::ideas))
        .route("/api/brainstorm/rapid", post(handlers::brainstorm::rapid))
        .route("/api/brainstorm/mvp", post(handlers::brainstorm::mvp))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Cross-origin policy pinned to the configured client URL. A value that
/// is not even a valid header is a config error, not a cue to go
/// wide open.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = frontend_url.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
