/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub zai_api_key: String,
    pub zai_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3001);

        Self {
            port,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "default-secret".to_string()),
            zai_api_key: std::env::var("ZAI_API_KEY").unwrap_or_default(),
            zai_base_url: std::env::var("ZAI_BASE_URL").ok(),
        }
    }
}
