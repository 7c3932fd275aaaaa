use std::{env, sync::Arc};

use gemma_core::error::{GemmaError, Result};

use crate::client::GeminiClient;

/// Environment variable [`GeminiAdapterBuilder::new_from_env`] reads.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Thin wrapper that wires the HTTP client [`GeminiClient`] into a value
/// that implements [`gemma_core::provider::GenerateContentProvider`].
///
/// * stores the API key and an optional custom base URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * provides a fluent [`GeminiAdapterBuilder`] so callers don’t have to juggle
///   `Option<String>` manually.
///
/// All user-facing functionality sits on the generic
/// [`gemma_core::ResponsePipeline`] once the adapter is plugged in.
pub struct GeminiAdapter {
    pub(crate) client: Arc<GeminiClient>,
}

/// Builder for [`GeminiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use gemma_gemini::GeminiAdapterBuilder;
///
/// let backend = GeminiAdapterBuilder::new_from_env()
///     .build()
///     .expect("GEMINI_API_KEY must be set");
/// ```
#[derive(Default)]
pub struct GeminiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
}

impl GeminiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that tries to load the `GEMINI_API_KEY`
    /// environment variable.
    ///
    /// Never panics. Missing keys only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok(),
            base_url: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`GemmaError::Configuration`] – if the API key is missing or empty.
    pub fn build(self) -> Result<GeminiAdapter> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GemmaError::Configuration(format!("missing env variable: `{API_KEY_ENV}`"))
            })?;

        let client =
            GeminiClient::with_http(api_key, reqwest::Client::new(), self.base_url);

        Ok(GeminiAdapter {
            client: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = GeminiAdapterBuilder::new().build().err().unwrap();
        assert!(matches!(err, GemmaError::Configuration(msg) if msg.contains(API_KEY_ENV)));

        let err = GeminiAdapterBuilder::new().with_api_key(" ").build().err().unwrap();
        assert!(matches!(err, GemmaError::Configuration(_)));
    }

    #[test]
    fn base_url_reaches_the_client() {
        let adapter = GeminiAdapterBuilder::new()
            .with_api_key("k")
            .with_base_url("http://localhost:9999/v1beta")
            .build()
            .unwrap();

        assert_eq!(
            adapter.client.endpoint("gemini-1.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
