//! Data models and structures
//!
//! Defines the reading API payloads and the environment-driven
//! configuration.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/reading`: one submitted form.
///
/// `card_names` may be shorter than `card_count` (unfilled inputs); it may
/// never address a position at or beyond `card_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRequest {
    pub question: String,
    pub card_count: usize,
    #[serde(default)]
    pub card_names: Vec<String>,
}

/// Successful reading response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingResponse {
    pub reading: String,
}

/// Error body returned by the API on any failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub chat_model: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| crate::Error::Config("OPENAI_API_KEY not set".to_string()))?;
        if openai_api_key.trim().is_empty() {
            return Err(crate::Error::Config("OPENAI_API_KEY is empty".to_string()));
        }

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            Err(_) => 3000,
        };

        Ok(Self {
            openai_api_key,
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
        })
    }
}
