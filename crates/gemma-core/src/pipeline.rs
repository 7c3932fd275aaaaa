//! One request/response cycle: call the provider once, pull the text out of
//! the first candidate and, in schema mode, make sure it is JSON.
//!
//! The pipeline is **generic over the provider type `P`**, so tests can plug
//! in a deterministic stub and the real backend costs no dynamic dispatch.
//!
//! ```rust,no_run
//! use gemma_core::{
//!     generic::{GenerationRequest, ResponseMode},
//!     model::Model,
//!     pipeline::ResponsePipeline,
//!     provider::GenerateContentProvider,
//!     schema::SchemaNode,
//! };
//!
//! async fn summarise<P: GenerateContentProvider>(provider: P) -> gemma_core::error::Result<String> {
//!     let request = GenerationRequest::from_documents(
//!         Model::default(),
//!         "Summarise the input.",
//!         "Rust is a systems programming language.",
//!         ResponseMode::Schema(SchemaNode::default_response()),
//!     );
//!     let result = ResponsePipeline::new(provider).run(request).await?;
//!     Ok(result.render())
//! }
//! ```
use crate::{
    error::{GemmaError, Result},
    generic::{GenerationRequest, GenerationResult, GenericGenerateResponse},
    provider::GenerateContentProvider,
};

/// Drives a single generation against one provider.
#[derive(Debug, Clone)]
pub struct ResponsePipeline<P> {
    provider: P,
}

impl<P> ResponsePipeline<P>
where
    P: GenerateContentProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Send `request` and validate the answer.
    ///
    /// # Errors
    ///
    /// * whatever the provider returns, unchanged,
    /// * [`GemmaError::NoCandidates`] for an empty candidate list,
    /// * [`GemmaError::InvalidJsonResponse`] when a schema-mode answer is not JSON.
    pub async fn run(&self, request: GenerationRequest) -> Result<GenerationResult> {
        let schema_mode = request.is_schema_mode();

        let response = self.provider.generate_content(request).await?;
        let raw_text = extract_text(&response)?;

        if schema_mode {
            parse_json(raw_text)
        } else {
            Ok(GenerationResult {
                raw_text,
                parsed_json: None,
            })
        }
    }
}

/// Concatenated text parts of the first candidate.
pub fn extract_text(response: &GenericGenerateResponse) -> Result<String> {
    let first = response.candidates.first().ok_or(GemmaError::NoCandidates)?;
    Ok(first.text())
}

/// Decode `raw_text` as JSON, keeping the raw text around for diagnostics.
pub fn parse_json(raw_text: String) -> Result<GenerationResult> {
    match serde_json::from_str(&raw_text) {
        Ok(value) => Ok(GenerationResult {
            raw_text,
            parsed_json: Some(value),
        }),
        Err(source) => Err(GemmaError::InvalidJsonResponse {
            raw: raw_text,
            source,
        }),
    }
}
