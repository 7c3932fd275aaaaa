//! Model identifiers used throughout the **gemma** workspace.
//!
//! Well-known Gemini models get an enum variant so application code can
//! refer to them without string literals; anything else (preview builds,
//! tuned models) travels as [`Model::Custom`]. Each provider crate maps the
//! variants onto its own naming scheme.
//!
//! # Adding more models
//!
//! 1. Add the variant to [`GeminiModel`] and its name to
//!    [`GeminiModel::as_str`].
//! 2. Update the mapping in the provider crate
//!    (`gemma-gemini::model_map::map_model`).
//!
//! # Example
//!
//! ```rust
//! use gemma_core::model::{GeminiModel, Model};
//!
//! assert_eq!("gemini-1.5-flash".parse::<Model>().unwrap(),
//!            Model::Gemini(GeminiModel::Gemini15Flash));
//! assert_eq!("my-tuned-model".parse::<Model>().unwrap(),
//!            Model::Custom("my-tuned-model".into()));
//! ```
use std::{convert::Infallible, fmt, str::FromStr};

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in Gemini models.
    Gemini(GeminiModel),
    /// Any model name not covered by a dedicated variant.
    Custom(String),
}

impl Default for Model {
    fn default() -> Self {
        Model::Gemini(GeminiModel::default())
    }
}

/// Gemini models known to support `responseSchema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeminiModel {
    #[default]
    Gemini15Flash,
    Gemini15Flash8b,
    Gemini15Pro,
    Gemini20Flash,
    Gemini25Flash,
    Gemini25Pro,
}

impl GeminiModel {
    pub const ALL: [GeminiModel; 6] = [
        GeminiModel::Gemini15Flash,
        GeminiModel::Gemini15Flash8b,
        GeminiModel::Gemini15Pro,
        GeminiModel::Gemini20Flash,
        GeminiModel::Gemini25Flash,
        GeminiModel::Gemini25Pro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeminiModel::Gemini15Flash => "gemini-1.5-flash",
            GeminiModel::Gemini15Flash8b => "gemini-1.5-flash-8b",
            GeminiModel::Gemini15Pro => "gemini-1.5-pro",
            GeminiModel::Gemini20Flash => "gemini-2.0-flash",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
        }
    }
}

impl From<GeminiModel> for Model {
    fn from(val: GeminiModel) -> Self {
        Model::Gemini(val)
    }
}

/// Never fails: unknown names become [`Model::Custom`].
impl FromStr for Model {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Ok(GeminiModel::ALL
            .into_iter()
            .find(|model| model.as_str() == name)
            .map(Model::Gemini)
            .unwrap_or_else(|| Model::Custom(name.to_string())))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Gemini(model) => f.write_str(model.as_str()),
            Model::Custom(name) => f.write_str(name),
        }
    }
}
