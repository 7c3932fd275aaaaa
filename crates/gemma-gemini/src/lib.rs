//! Google Gemini backend for **gemma**.
//!
//! [`GeminiAdapter`] implements
//! [`GenerateContentProvider`](gemma_core::provider::GenerateContentProvider)
//! on top of the REST `generateContent` endpoint; [`api_v1`] holds the wire
//! types, including the provider-native response [`Schema`](api_v1::Schema).
mod adapter;
mod model_map;
mod provider_impl;

pub use adapter::{API_KEY_ENV, GeminiAdapter, GeminiAdapterBuilder};
pub mod api_v1;
mod client;
pub mod error;

pub use client::GeminiClient;
