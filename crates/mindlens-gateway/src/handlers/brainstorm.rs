use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::json;

use mindlens_core::analysis::Brainstorm;
use mindlens_core::builders::{brainstorm_request, Verbosity};

use crate::error::ApiError;
use crate::handlers::{envelope, require_json, required_field, run_analysis, to_data, with_fields};
use crate::models::{BrainstormIdeasRequest, MvpBrainstormRequest, RapidBrainstormRequest};
use crate::AppState;

pub async fn ideas(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BrainstormIdeasRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let prompt = required_field(payload.prompt, "Prompt is required")?;

    let request = brainstorm_request(&prompt, payload.context.as_deref(), None)?;
    let brainstorm: Brainstorm = run_analysis(&state, request, "Failed to brainstorm").await?;

    let idea_count = brainstorm.ideas.len();
    let data = with_fields(
        to_data(&brainstorm)?,
        vec![("ideaCount", json!(idea_count))],
    );
    Ok(envelope(data))
}

pub async fn rapid(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RapidBrainstormRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let topic = required_field(payload.topic, "Topic is required")?;

    // Anything other than an explicit "long" gets the short framing.
    let duration = match payload.duration.as_deref() {
        Some("long") => "long",
        _ => "short",
    };
    let verbosity = match duration {
        "long" => Verbosity::Long,
        _ => Verbosity::Short,
    };

    let context = format!("Duration: {duration}");
    let request = brainstorm_request(&topic, Some(&context), Some(verbosity))?;
    let brainstorm: Brainstorm = run_analysis(&state, request, "Rapid brainstorm failed").await?;

    let data = with_fields(to_data(&brainstorm)?, vec![("duration", json!(duration))]);
    Ok(envelope(data))
}

pub async fn mvp(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MvpBrainstormRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let idea = required_field(payload.idea, "Idea is required")?;

    let context = match payload.constraints.filter(|c| !c.trim().is_empty()) {
        Some(constraints) => format!("Idea: {idea}\nConstraints: {constraints}"),
        None => format!("Idea: {idea}\nGoal: Create MVP plan with minimal viable features"),
    };

    let request = brainstorm_request(
        "Create MVP feature list and development roadmap",
        Some(&context),
        None,
    )?;
    let brainstorm: Brainstorm = run_analysis(&state, request, "MVP brainstorm failed").await?;

    let data = with_fields(to_data(&brainstorm)?, vec![("type", json!("mvp"))]);
    Ok(envelope(data))
}
