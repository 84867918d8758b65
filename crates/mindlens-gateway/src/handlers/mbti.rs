use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use mindlens_core::analysis::MbtiAnalysis;
use mindlens_core::builders::{mbti_request, quiz_answers_to_text, MbtiMode};

use crate::error::ApiError;
use crate::handlers::{envelope, require_json, required_field, run_analysis, to_data};
use crate::models::{MbtiAnalyzeRequest, MbtiQuizRequest};
use crate::AppState;

const FAILURE: &str = "Failed to analyze MBTI";

fn parse_mode(kind: Option<&str>) -> Result<MbtiMode, ApiError> {
    match kind.unwrap_or("text") {
        "text" => Ok(MbtiMode::Text),
        "image" => Ok(MbtiMode::Image),
        "quiz" => Ok(MbtiMode::Quiz),
        _ => Err(ApiError::validation(
            "Invalid type. Must be: text, image, or quiz",
        )),
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MbtiAnalyzeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let input = required_field(payload.input, "Input is required")?;
    let mode = parse_mode(payload.kind.as_deref())?;

    let request = mbti_request(&input, mode)?;
    let analysis: MbtiAnalysis = run_analysis(&state, request, FAILURE).await?;
    Ok(envelope(to_data(&analysis)?))
}

pub async fn quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MbtiQuizRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let answers = match payload.answers {
        Some(answers) if !answers.is_empty() => answers,
        _ => return Err(ApiError::validation("Quiz answers array is required")),
    };

    let request = mbti_request(&quiz_answers_to_text(&answers), MbtiMode::Quiz)?;
    let analysis: MbtiAnalysis = run_analysis(&state, request, "MBTI quiz failed").await?;
    Ok(envelope(to_data(&analysis)?))
}
