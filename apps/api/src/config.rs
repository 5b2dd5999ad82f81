use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

/// Application configuration loaded from environment variables.
/// Every variable is optional; the LLM credential and Redis URL switch
/// features on when present.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Credential for the generative-text API. `None` disables bio generation.
    pub api_key: Option<String>,
    pub llm_api_base: String,
    /// Key-value store for the display theme. `None` keeps it in process memory.
    pub redis_url: Option<String>,
    /// Origin used when building shareable publication links.
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            api_key: optional_env("API_KEY").or_else(|| optional_env("GEMINI_API_KEY")),
            llm_api_base: optional_env("LLM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            redis_url: optional_env("REDIS_URL"),
            public_base_url: optional_env("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{port}")),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            api_key: None,
            llm_api_base: DEFAULT_API_BASE.to_string(),
            redis_url: None,
            public_base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
