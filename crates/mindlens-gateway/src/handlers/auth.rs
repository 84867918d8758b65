use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::auth::{self, AuthOutcome};
use crate::error::ApiError;
use crate::handlers::{require_json, required_field};
use crate::models::{LoginRequest, RegisterRequest, Tier, User, UserProfile};
use crate::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = require_json(payload)?;
    let email = required_field(payload.email, "Email and password are required")?;
    let password = required_field(payload.password, "Email and password are required")?;

    if state.store.contains(&email).await {
        return Err(ApiError::validation("User already exists"));
    }

    let password_hash = auth::hash_password(password).await?;

    let name = payload
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or(&email).to_string());

    let user = User {
        id: Utc::now().timestamp_millis().to_string(),
        email: email.clone(),
        name,
        created_at: Utc::now().to_rfc3339(),
        subscription: Tier::Free,
        password_hash,
    };

    // Insert is the authoritative uniqueness check; `contains` above only
    // short-circuits the hashing work.
    state
        .store
        .insert(user.clone())
        .await
        .map_err(|_| ApiError::validation("User already exists"))?;

    tracing::info!("registered user {}", email);

    let token = state.tokens.issue(&user)?;
    let body = json!({
        "success": true,
        "data": {
            "user": UserProfile::from(&user),
            "token": token,
        },
    });

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = require_json(payload)?;
    let email = required_field(payload.email, "Email and password are required")?;
    let password = required_field(payload.password, "Email and password are required")?;

    let user = state
        .store
        .get(&email)
        .await
        .ok_or_else(|| ApiError::auth("Invalid credentials"))?;

    let valid = auth::verify_password(password, user.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::auth("Invalid credentials"));
    }

    let token = state.tokens.issue(&user)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "user": UserProfile::from(&user),
            "token": token,
        },
    })))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| ApiError::auth("No token provided"))?;

    let claims = match state.tokens.verify(token) {
        AuthOutcome::Authenticated(claims) => claims,
        AuthOutcome::Rejected(_) => return Err(ApiError::auth("Invalid token")),
    };

    // The table is process-lifetime; after a restart the token may outlive
    // its user record.
    let user = state
        .store
        .get(&claims.email)
        .await
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "success": true,
        "data": UserProfile::from(&user),
    })))
}
