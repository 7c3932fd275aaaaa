//! Provider-agnostic request and response types.
//!
//! A backend receives a [`GenerationRequest`], talks to its API and hands
//! back a [`GenericGenerateResponse`]. Turning that into the final output is
//! the job of the [`ResponsePipeline`](crate::pipeline::ResponsePipeline),
//! which produces a [`GenerationResult`].
use serde_json::Value;

use crate::{model::Model, schema::SchemaNode};

/// MIME type requested from the provider in schema mode.
pub const JSON_MIME_TYPE: &str = "application/json";

/// How the provider's answer is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    /// Constrain the answer with a schema and parse it as JSON.
    Schema(SchemaNode),
    /// No schema, the text is passed through untouched.
    Plain,
}

/// Build the prompt text sent to the model: instructions, a blank line,
/// then the input document under an `Input:` label.
pub fn compose_prompt(prompt: &str, input: &str) -> String {
    format!("{prompt}\n\nInput:\n{input}")
}

/// Everything a backend needs for one call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    model: Model,
    prompt: String,
    response_schema: Option<SchemaNode>,
    mime_type: Option<String>,
}

impl GenerationRequest {
    /// In [`ResponseMode::Schema`] the MIME type is fixed to
    /// [`JSON_MIME_TYPE`]; plain mode sets neither schema nor MIME type.
    pub fn new(model: Model, prompt: impl Into<String>, mode: ResponseMode) -> Self {
        let (response_schema, mime_type) = match mode {
            ResponseMode::Schema(schema) => (Some(schema), Some(JSON_MIME_TYPE.to_string())),
            ResponseMode::Plain => (None, None),
        };

        Self {
            model,
            prompt: prompt.into(),
            response_schema,
            mime_type,
        }
    }

    /// Convenience constructor combining a prompt document and an input
    /// document with [`compose_prompt`].
    pub fn from_documents(model: Model, prompt: &str, input: &str, mode: ResponseMode) -> Self {
        Self::new(model, compose_prompt(prompt, input), mode)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response_schema(&self) -> Option<&SchemaNode> {
        self.response_schema.as_ref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn is_schema_mode(&self) -> bool {
        self.response_schema.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenericGenerateResponse {
    pub candidates: Vec<GenericCandidate>,
    pub usage: Option<GenericUsageReport>,
}

/// One alternative answer, as an ordered list of parts.
#[derive(Debug, Clone, Default)]
pub struct GenericCandidate {
    pub parts: Vec<GenericPart>,
    pub finish_reason: Option<String>,
}

impl GenericCandidate {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![GenericPart::Text(text.into())],
            finish_reason: None,
        }
    }

    /// Concatenation of all text parts in provider order.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                GenericPart::Text(text) => Some(text.as_str()),
                GenericPart::Other(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericPart {
    Text(String),
    /// Anything that isn't text (inline data, function calls, …), labelled
    /// with the provider's field name for diagnostics.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericUsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Outcome of a successful pipeline run.
///
/// `parsed_json` is only set in schema mode, after the text decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub raw_text: String,
    pub parsed_json: Option<Value>,
}

impl GenerationResult {
    /// Bytes to emit: pretty JSON with two-space indentation when parsed,
    /// the raw text otherwise.
    pub fn render(&self) -> String {
        match &self.parsed_json {
            Some(value) => format!("{value:#}"),
            None => self.raw_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prompt_layout() {
        assert_eq!(
            compose_prompt("Summarise.", "some text"),
            "Summarise.\n\nInput:\nsome text"
        );
    }

    #[test]
    fn schema_mode_requests_json() {
        let request = GenerationRequest::from_documents(
            Model::default(),
            "p",
            "i",
            ResponseMode::Schema(SchemaNode::default_response()),
        );

        assert!(request.is_schema_mode());
        assert_eq!(request.mime_type(), Some(JSON_MIME_TYPE));
        assert_eq!(request.prompt(), "p\n\nInput:\ni");
    }

    #[test]
    fn plain_mode_sets_nothing() {
        let request = GenerationRequest::new(Model::default(), "hi", ResponseMode::Plain);

        assert!(!request.is_schema_mode());
        assert_eq!(request.mime_type(), None);
        assert!(request.response_schema().is_none());
    }

    #[test]
    fn candidate_text_skips_other_parts() {
        let candidate = GenericCandidate {
            parts: vec![
                GenericPart::Text("{\"a\":".into()),
                GenericPart::Other("inlineData".into()),
                GenericPart::Text("1}".into()),
            ],
            finish_reason: Some("STOP".into()),
        };

        assert_eq!(candidate.text(), "{\"a\":1}");
    }

    #[test]
    fn render_uses_two_space_indent() {
        let result = GenerationResult {
            raw_text: "{\"message\":\"hello\"}".into(),
            parsed_json: Some(json!({ "message": "hello" })),
        };

        assert_eq!(result.render(), "{\n  \"message\": \"hello\"\n}");
    }

    #[test]
    fn render_plain_is_verbatim() {
        let result = GenerationResult {
            raw_text: "  not json\n".into(),
            parsed_json: None,
        };

        assert_eq!(result.render(), "  not json\n");
    }
}
