use std::{future::Future, pin::Pin, sync::Arc};

use gemma_core::{
    error::{GemmaError, Result},
    generic::{GenerationRequest, GenericGenerateResponse},
    provider::GenerateContentProvider,
};

use crate::{GeminiAdapter, api_v1::GenerateContentRequest, model_map::map_model};

impl GenerateContentProvider for GeminiAdapter {
    fn generate_content<'p>(
        &'p self,
        request: GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenericGenerateResponse>> + Send + 'p>> {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let model = map_model(request.model())
                .ok_or_else(|| GemmaError::Configuration("model name must not be empty".into()))?
                .into_owned();

            let body = GenerateContentRequest::from(&request);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                model = %model,
                schema_mode = request.is_schema_mode(),
                prompt_bytes = request.prompt().len(),
                "sending generateContent request"
            );

            let response = client.generate_content(&model, &body).await?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                candidates = response.candidates.len(),
                model_version = response.model_version.as_deref().unwrap_or("unknown"),
                "received generateContent response"
            );

            Ok(response.into())
        })
    }
}
