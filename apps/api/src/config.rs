use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: String,
    pub mistral_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            // Not required: a missing key surfaces as a 401 from the endpoint on each upload.
            mistral_api_key: std::env::var("MISTRAL_API_KEY").unwrap_or_default(),
            mistral_api_url: std::env::var("MISTRAL_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.mistral_api_key.trim().is_empty()
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing at an arbitrary endpoint, for tests.
    pub fn for_endpoint(url: &str) -> Self {
        Config {
            mistral_api_key: "test-key".to_string(),
            mistral_api_url: url.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
