//! # `gemma` – The umbrella crate
//!
//! One import for the whole stack:
//!
//! | Crate              | What it provides                                                              |
//! |--------------------|-------------------------------------------------------------------------------|
//! | **`gemma-core`**   | `SchemaNode` + translator, request/response types, `ResponsePipeline`, errors |
//! | **`gemma-gemini`** | `reqwest` client and `GeminiAdapter` for the Gemini REST API *(optional)*     |
//!
//! The `gemini` feature (on by default) re-exports the backend as
//! `gemma::gemini`. Without it the crate stays free of HTTP and TLS
//! dependencies.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use gemma::{
//!     ResponsePipeline,
//!     generic::{GenerationRequest, ResponseMode},
//!     model::Model,
//!     schema::SchemaNode,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = gemma::gemini::GeminiAdapterBuilder::new_from_env().build()?;
//!     let request = GenerationRequest::from_documents(
//!         Model::default(),
//!         "Summarise the input in one sentence.",
//!         "Rust is a language empowering everyone to build reliable software.",
//!         ResponseMode::Schema(SchemaNode::default_response()),
//!     );
//!
//!     let result = ResponsePipeline::new(backend).run(request).await?;
//!     println!("{}", result.render());
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/gemma/latest")]

pub use gemma_core::*;

#[cfg(feature = "gemini")]
pub use gemma_gemini as gemini;
