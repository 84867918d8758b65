use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use mindlens_core::analysis::{parse_payload, ModelPayload};
use mindlens_core::upstream::CompletionRequest;

use crate::error::ApiError;
use crate::AppState;

pub mod auth;
pub mod brainstorm;
pub mod chat;
pub mod mbti;
pub mod photo;

/// Success envelope for the analysis endpoints.
pub(crate) fn envelope(data: Value) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": data,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Attach derived fields (platform, ideaCount, ...) to a serialized
/// analysis payload.
pub(crate) fn with_fields(base: Value, extra: Vec<(&'static str, Value)>) -> Value {
    match base {
        Value::Object(mut map) => {
            for (key, value) in extra {
                map.insert(key.to_string(), value);
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Unwrap a JSON body, turning any extractor rejection into the 400
/// envelope instead of axum's plain-text response.
pub(crate) fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(inner)) => Ok(inner),
        Err(rejection) => Err(ApiError::validation(rejection.body_text())),
    }
}

/// Pull a required field out of an Option-typed payload with the route's
/// own error message.
pub(crate) fn required_field(
    value: Option<String>,
    message: &'static str,
) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation(message)),
    }
}

/// One completion round trip plus parse-and-validate. Upstream detail is
/// logged; the client only ever sees `failure_message`.
pub(crate) async fn run_analysis<T: DeserializeOwned>(
    state: &AppState,
    request: CompletionRequest,
    failure_message: &'static str,
) -> Result<T, ApiError> {
    let content = state.model.complete(request).await.map_err(|err| {
        tracing::error!("upstream completion failed: {err}");
        ApiError::upstream(failure_message)
    })?;

    match parse_payload::<T>(&content) {
        ModelPayload::Parsed(value) => Ok(value),
        ModelPayload::Malformed { raw } => {
            tracing::error!("upstream content failed contract validation: {raw}");
            Err(ApiError::upstream(failure_message))
        }
    }
}

pub(crate) fn to_data<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| {
        tracing::error!("response serialization failed: {err}");
        ApiError::internal("Response serialization failed")
    })
}
