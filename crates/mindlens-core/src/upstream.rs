use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.z.ai/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Which upstream model a request is routed to. Photo (and image-mode
/// personality) analysis needs the vision-capable model; everything else
/// goes to the general chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    General,
    Vision,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::General => "glm-4.7",
            ModelKind::Vision => "glm-4v",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserContent {
    Text(String),
    /// Mixed message: instruction text plus a `data:<mime>;base64,...` URL.
    TextWithImage { text: String, image_url: String },
}

/// One fully-shaped chat-completion request. Builders produce these; the
/// client serializes them into the upstream wire body.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: ModelKind,
    pub system: String,
    pub user: UserContent,
}

impl CompletionRequest {
    /// Upstream chat-completions body. Always asks for a JSON object back;
    /// the model may or may not honor the hint, which is why the response
    /// still goes through `analysis::parse_payload`.
    pub fn to_body(&self) -> Value {
        let user_content = match &self.user {
            UserContent::Text(text) => json!(text),
            UserContent::TextWithImage { text, image_url } => json!([
                { "type": "text", "text": text },
                { "type": "image_url", "image_url": { "url": image_url } },
            ]),
        };

        json!({
            "model": self.model.as_str(),
            "messages": [
                { "role": "system", "content": self.system },
                { "role": "user", "content": user_content },
            ],
            "response_format": { "type": "json_object" },
        })
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("upstream response carried no completion content")]
    MissingContent,
}

/// Seam between the gateway and the hosted model. Handlers only ever see
/// this trait, so tests can count invocations without any network.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// One round trip to the upstream model, returning the first choice's
    /// message content. No retries, no caching.
    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError>;
}

/// Z.ai chat-completions client. Bearer-authenticated, single attempt,
/// bounded by a request timeout.
pub struct ZaiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ZaiClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CompletionClient for ZaiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("upstream rejected completion request: {}", status);
            return Err(UpstreamError::Status(status));
        }

        let body: Value = response.json().await?;

        // Some deployments honor the json_object hint by inlining an object
        // instead of a string; normalize both to one string shape.
        match &body["choices"][0]["message"]["content"] {
            Value::String(content) => Ok(content.clone()),
            Value::Null => Err(UpstreamError::MissingContent),
            other => Ok(other.to_string()),
        }
    }
}
