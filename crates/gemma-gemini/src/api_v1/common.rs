use gemma_core::generic::GenericUsageReport;
use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! impl_builder_methods {
    ($builder:ident, $($field:ident: $field_type:ty),*) => {
        impl $builder {
            $(
                pub fn $field(mut self, $field: $field_type) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }
    };
}

/// Token accounting attached to every `generateContent` response.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: i64,
    #[serde(default)]
    pub candidates_token_count: i64,
    #[serde(default)]
    pub total_token_count: i64,
}

impl From<UsageMetadata> for GenericUsageReport {
    fn from(value: UsageMetadata) -> Self {
        GenericUsageReport {
            prompt_tokens: value.prompt_token_count,
            completion_tokens: value.candidates_token_count,
            total_tokens: value.total_token_count,
        }
    }
}

/// Body of a non-success response: `{ "error": { "code", "message", "status" } }`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
