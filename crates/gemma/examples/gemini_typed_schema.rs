use gemma::{
    ResponsePipeline,
    gemini::GeminiAdapterBuilder,
    generic::{GenerationRequest, ResponseMode},
    model::{GeminiModel, Model},
    schema_util::schema_node_for,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// # Typed schema – derive the response schema from a Rust struct
///
/// This example
///
/// 1. **Builds** a Gemini backend (`GeminiAdapter`) from `GEMINI_API_KEY`.
/// 2. **Derives** the response schema from `Contact` via `schemars`.
/// 3. **Sends** a prompt plus an input document through the pipeline.
/// 4. **Deserialises** the validated JSON into `Contact`.
///
/// ## How to run
///
/// ```bash
/// export GEMINI_API_KEY=…
/// cargo run -p gemma --example gemini_typed_schema
/// ```
////////////////////////////////////////////////////////////////////////////////

const SIGNATURE: &str = "\
Best regards,
Ada Lovelace
Head of Research, Analytical Engines Ltd.
ada@example.com";

/// The *shape* of the answer we expect from the model.
#[derive(Debug, Deserialize, JsonSchema)]
struct Contact {
    /// Full name of the person.
    name: String,
    /// Job title, as written.
    title: String,
    email: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let backend = GeminiAdapterBuilder::new_from_env().build()?;
    let schema = schema_node_for::<Contact>()?;

    let request = GenerationRequest::from_documents(
        Model::Gemini(GeminiModel::Gemini15Flash),
        "Extract the contact details from the email signature.",
        SIGNATURE,
        ResponseMode::Schema(schema),
    );

    let result = ResponsePipeline::new(backend).run(request).await?;
    let contact: Contact = serde_json::from_value(result.parsed_json.unwrap_or_default())?;

    println!("Response: {contact:?}");
    Ok(())
}
