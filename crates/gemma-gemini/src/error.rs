use gemma_core::error::GemmaError;
use reqwest::{StatusCode, header::InvalidHeaderValue};

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t decode body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Gemini returned non-success status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] InvalidHeaderValue),
}

impl From<GeminiError> for GemmaError {
    fn from(value: GeminiError) -> Self {
        GemmaError::Provider(Box::new(value))
    }
}
