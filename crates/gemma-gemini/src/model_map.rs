use std::borrow::Cow;

use gemma_core::model::Model;

/// Provider name for `model`, `None` for an empty custom name.
pub(crate) fn map_model(model: &Model) -> Option<Cow<'_, str>> {
    match model {
        Model::Gemini(gemini) => Some(gemini.as_str().into()),
        Model::Custom(name) if name.trim().is_empty() => None,
        Model::Custom(name) => Some(name.trim().into()),
    }
}
