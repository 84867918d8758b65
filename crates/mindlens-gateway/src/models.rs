use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

/// In-memory user record. The hash never leaves the store; the wire shape
/// is `UserProfile`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub subscription: Tier,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub subscription: Tier,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at.clone(),
            subscription: user.subscription,
        }
    }
}

/// JWT claims: who the token was issued to and when it stops being valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub exp: usize,
}

// ── API Payloads ────────────────────────────────────────────────
// Required fields are Options so a missing field surfaces as a 400 with
// the route's own message instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MbtiAnalyzeRequest {
    pub input: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MbtiQuizRequest {
    pub answers: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ChatAnalyzeRequest {
    #[serde(rename = "chatHistory")]
    pub chat_history: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoAnalyzeRequest {
    #[serde(rename = "chatText")]
    pub chat_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BrainstormIdeasRequest {
    pub prompt: Option<String>,
    pub context: Option<String>,
    /// Accepted for wire compatibility; the response's `ideaCount` is
    /// derived from what the model actually returned.
    #[serde(rename = "ideaCount")]
    pub idea_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RapidBrainstormRequest {
    pub topic: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MvpBrainstormRequest {
    pub idea: Option<String>,
    pub constraints: Option<String>,
}
