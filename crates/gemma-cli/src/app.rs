//! One run, start to finish: read the documents, pick the response mode,
//! call the provider through the [`ResponsePipeline`], emit the result.
//!
//! Each step tags its failure with a [`Stage`], and nothing is written
//! until every earlier step succeeded.
use std::{fmt, fs, io::Write, path::Path};

use anyhow::Context as _;
use gemma::{
    ResponsePipeline,
    error::{GemmaError, Result},
    gemini::{GeminiAdapter, GeminiAdapterBuilder},
    generic::{GenerationRequest, ResponseMode},
    provider::GenerateContentProvider,
    schema::SchemaNode,
};
use tracing::debug;

use crate::config::RunConfig;

/// Step of a run, used as the error tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configure,
    LoadInputs,
    PrepareSchema,
    GenerateContent,
    FormatResponse,
    WriteOutput,
}

impl Stage {
    pub fn tag(self) -> &'static str {
        match self {
            Stage::Configure => "configure",
            Stage::LoadInputs => "load inputs",
            Stage::PrepareSchema => "prepare schema",
            Stage::GenerateContent => "generate content",
            Stage::FormatResponse => "format response",
            Stage::WriteOutput => "write output",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Gemini backend for `config`. Builds the HTTP client, sends nothing.
pub fn build_provider(config: &RunConfig) -> Result<GeminiAdapter> {
    let builder = GeminiAdapterBuilder::new().with_api_key(config.api_key.clone());
    match &config.base_url {
        Some(base_url) => builder.with_base_url(base_url.clone()).build(),
        None => builder.build(),
    }
}

/// Schema mode with the configured (or default) schema, or plain mode.
pub fn response_mode(config: &RunConfig) -> Result<ResponseMode> {
    if config.plain {
        return Ok(ResponseMode::Plain);
    }

    let schema = match &config.schema_file {
        Some(path) => {
            let bytes = fs::read(path).map_err(|err| GemmaError::io(path, err))?;
            SchemaNode::from_slice(&bytes)?
        }
        None => SchemaNode::default_response(),
    };

    Ok(ResponseMode::Schema(schema))
}

pub async fn run<P>(config: &RunConfig, provider: P, stdout: &mut impl Write) -> anyhow::Result<()>
where
    P: GenerateContentProvider,
{
    let prompt = read_text(&config.prompt_file).context(Stage::LoadInputs)?;
    let input = read_text(&config.input_file).context(Stage::LoadInputs)?;
    debug!(
        prompt_bytes = prompt.len(),
        input_bytes = input.len(),
        "inputs loaded"
    );

    let mode = response_mode(config).context(Stage::PrepareSchema)?;
    debug!(schema_mode = matches!(mode, ResponseMode::Schema(_)), "schema ready");

    let request = GenerationRequest::from_documents(config.model.clone(), &prompt, &input, mode);
    debug!(model = %config.model, "sending request");

    let result = ResponsePipeline::new(provider)
        .run(request)
        .await
        .map_err(|err| {
            let stage = match &err {
                GemmaError::InvalidJsonResponse { raw, .. } => {
                    debug!(raw = %raw, "response is not valid JSON");
                    Stage::FormatResponse
                }
                _ => Stage::GenerateContent,
            };
            anyhow::Error::new(err).context(stage)
        })?;

    config
        .output
        .emit(&result.render(), stdout)
        .context(Stage::WriteOutput)?;

    debug!("done");
    Ok(())
}

/// Single-line diagnostic: the stage tag followed by the error it wraps.
pub fn diagnostic(err: &anyhow::Error) -> String {
    err.chain()
        .take(2)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| GemmaError::io(path, err))
}
