//! Provider-agnostic building blocks of the **gemma** structured-output tool.
//!
//! * [`schema`] – the typed [`SchemaNode`](schema::SchemaNode) and the
//!   translator decoding a JSON Schema document into it.
//! * [`generic`] – request / response types shared by every backend.
//! * [`provider`] – the [`GenerateContentProvider`](provider::GenerateContentProvider)
//!   trait backends implement.
//! * [`pipeline`] – the single-pass [`ResponsePipeline`](pipeline::ResponsePipeline).
//!
//! Backend crates (e.g. `gemma-gemini`) only implement the provider trait;
//! everything else lives here so all backends behave alike.
pub mod error;
pub mod generic;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod schema;
pub mod schema_util;

pub use pipeline::ResponsePipeline;
