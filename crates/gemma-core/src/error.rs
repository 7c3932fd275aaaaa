//! Unified error type exposed by **`gemma-core`**.
//!
//! Backend crates convert their internal errors into [`GemmaError::Provider`]
//! before bubbling them up to the [`ResponsePipeline`](crate::pipeline::ResponsePipeline).
//! The variants follow the stages of a run: configuration, file access,
//! schema translation, the provider call and the response format check.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GemmaError>;

#[derive(Debug, Error)]
pub enum GemmaError {
    /// A required flag or environment variable is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Reading or writing one of the run's files failed.
    #[error("i/o error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is malformed or uses an unsupported type.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Generic forwarding of any backend-specific error.
    #[error("provider returned an error: {0}")]
    Provider(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The provider answered, but without a single candidate.
    #[error("no response candidates received")]
    NoCandidates,

    /// Schema mode expected JSON, the provider sent something else.
    #[error("failed to parse response as JSON: {source}")]
    InvalidJsonResponse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GemmaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GemmaError::Io {
            path: path.into(),
            source,
        }
    }
}
