use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use mindlens_core::analysis::PhotoAnalysis;
use mindlens_core::builders::photo_request;

use crate::error::ApiError;
use crate::handlers::{envelope, run_analysis, to_data};
use crate::AppState;

const FAILURE: &str = "Failed to analyze photo";

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid multipart body"))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let mime = field.content_type().unwrap_or_default().to_string();
        if !mime.starts_with("image/") {
            return Err(ApiError::validation("Only image files are allowed"));
        }

        // The body-size layer caps the whole request at 10MB; an oversized
        // or truncated upload fails this read.
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::validation("Failed to read image upload"))?;

        image = Some((mime, data.to_vec()));
        break;
    }

    let (mime, data) = match image {
        Some((mime, data)) if !data.is_empty() => (mime, data),
        _ => return Err(ApiError::validation("No image file provided")),
    };

    let data_url = format!("data:{};base64,{}", mime, BASE64.encode(&data));
    let request = photo_request(&data_url)?;

    let analysis: PhotoAnalysis = run_analysis(&state, request, FAILURE).await?;
    Ok(envelope(to_data(&analysis)?))
}
