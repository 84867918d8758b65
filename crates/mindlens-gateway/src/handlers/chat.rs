use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use mindlens_core::analysis::ChatAnalysis;
use mindlens_core::builders::chat_request;
use mindlens_core::chatfmt::clean_kakao_transcript;

use crate::error::ApiError;
use crate::handlers::{envelope, require_json, required_field, run_analysis, to_data, with_fields};
use crate::models::{ChatAnalyzeRequest, KakaoAnalyzeRequest};
use crate::AppState;

async fn analyze_transcript(
    state: &AppState,
    transcript: &str,
    platform: &str,
    failure_message: &'static str,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = chat_request(transcript)?;
    let analysis: ChatAnalysis = run_analysis(state, request, failure_message).await?;

    let data = with_fields(
        to_data(&analysis)?,
        vec![
            ("platform", json!(platform)),
            ("analyzedAt", json!(Utc::now().to_rfc3339())),
        ],
    );
    Ok(envelope(data))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatAnalyzeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let chat_history = required_field(payload.chat_history, "Chat history is required")?;
    let platform = payload.platform.unwrap_or_else(|| "general".to_string());

    analyze_transcript(&state, &chat_history, &platform, "Chat analysis failed").await
}

pub async fn analyze_kakao(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<KakaoAnalyzeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let chat_text = required_field(payload.chat_text, "Chat text is required")?;

    let cleaned = clean_kakao_transcript(&chat_text);
    analyze_transcript(&state, &cleaned, "kakaotalk", "Kakao chat analysis failed").await
}
