use std::{future::Future, pin::Pin};

use crate::{
    error::Result,
    generic::{GenerationRequest, GenericGenerateResponse},
};

/// A **backend** turns a [`GenerationRequest`] into a network call to a
/// concrete provider and returns its candidates in generic form.
///
/// The trait is intentionally minimal:
///
/// * **One method** – `generate_content`, a *single* non-streaming
///   round-trip. Retries, if any, are the backend's business; the pipeline
///   calls it exactly once.
/// * **No interpretation** – extracting text, checking for empty candidate
///   lists and parsing JSON happen in the
///   [`ResponsePipeline`](crate::pipeline::ResponsePipeline), so every
///   backend gets the same semantics.
///
/// The method returns a [`Pin<Box<dyn Future>>`] so we stay object-safe
/// without pulling in `async_trait`.
pub trait GenerateContentProvider: Send + Sync {
    fn generate_content<'p>(
        &'p self,
        request: GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenericGenerateResponse>> + Send + 'p>>;
}

impl<P: GenerateContentProvider + ?Sized> GenerateContentProvider for &P {
    fn generate_content<'p>(
        &'p self,
        request: GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenericGenerateResponse>> + Send + 'p>> {
        (**self).generate_content(request)
    }
}
