use std::collections::BTreeMap;

use gemma_core::generic::{
    GenerationRequest, GenericCandidate, GenericGenerateResponse, GenericPart,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_builder_methods;

use super::{Schema, UsageMetadata};

/// Body of `POST /v1beta/models/{model}:generateContent`.
///
/// The model travels in the URL, not in the body.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: None,
        }
    }
}

impl_builder_methods!(GenerateContentRequest, generation_config: GenerationConfig);

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(value: &GenerationRequest) -> Self {
        let request = Self::new(vec![Content::user_text(value.prompt())]);

        if value.response_schema().is_none() && value.mime_type().is_none() {
            return request;
        }

        request.generation_config(GenerationConfig {
            response_mime_type: value.mime_type().map(str::to_string),
            response_schema: value.response_schema().map(Schema::from),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
}

/// Content container used in both requests and responses.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".into()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A single content part. Only `text` is modelled; inline data, function
/// calls and friends are kept verbatim in `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: BTreeMap::new(),
        }
    }
}

impl From<Part> for GenericPart {
    fn from(value: Part) -> Self {
        match value.text {
            Some(text) => GenericPart::Text(text),
            None => GenericPart::Other(
                value
                    .extra
                    .into_keys()
                    .next()
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<Value>,
    pub model_version: Option<String>,
}

/// Candidate completion item. `content` is missing when the candidate was
/// blocked (`finishReason: SAFETY` and friends).
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
    pub index: Option<i64>,
}

impl From<Candidate> for GenericCandidate {
    fn from(value: Candidate) -> Self {
        GenericCandidate {
            parts: value
                .content
                .map(|content| content.parts.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
            finish_reason: value.finish_reason,
        }
    }
}

impl From<GenerateContentResponse> for GenericGenerateResponse {
    fn from(value: GenerateContentResponse) -> Self {
        GenericGenerateResponse {
            candidates: value.candidates.into_iter().map(Into::into).collect(),
            usage: value.usage_metadata.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use gemma_core::{
        generic::ResponseMode,
        model::Model,
        schema::SchemaNode,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_request_body() {
        let request = GenerationRequest::from_documents(
            Model::default(),
            "Echo.",
            "hello",
            ResponseMode::Schema(SchemaNode::default_response()),
        );

        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [
                    { "role": "user", "parts": [ { "text": "Echo.\n\nInput:\nhello" } ] }
                ],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "OBJECT",
                        "properties": {
                            "message": {
                                "type": "STRING",
                                "description": "Response message from Gemini"
                            }
                        },
                        "required": ["message"]
                    }
                }
            })
        );
    }

    #[test]
    fn plain_request_has_no_generation_config() {
        let request = GenerationRequest::new(Model::default(), "hi", ResponseMode::Plain);
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({ "contents": [ { "role": "user", "parts": [ { "text": "hi" } ] } ] })
        );
    }

    #[test]
    fn decodes_response_into_generic_form() {
        let raw = json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "{\"message\":" },
                            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                            { "text": "\"hello\"}" }
                        ]
                    },
                    "finishReason": "STOP",
                    "index": 0,
                    "safetyRatings": []
                },
                { "finishReason": "SAFETY", "index": 1 }
            ],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 5,
                "totalTokenCount": 17
            },
            "modelVersion": "gemini-1.5-flash-002"
        });

        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let generic = GenericGenerateResponse::from(response);

        assert_eq!(generic.candidates.len(), 2);
        assert_eq!(generic.candidates[0].text(), "{\"message\":\"hello\"}");
        assert_eq!(
            generic.candidates[0].parts[1],
            GenericPart::Other("inlineData".into())
        );
        assert!(generic.candidates[1].parts.is_empty());
        assert_eq!(generic.usage.map(|u| u.total_tokens), Some(17));
    }

    #[test]
    fn missing_candidates_decode_as_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();

        assert!(response.candidates.is_empty());
        assert!(response.prompt_feedback.is_some());
    }
}
