use std::path::PathBuf;

use gemma::{
    error::{GemmaError, Result},
    gemini::API_KEY_ENV,
    model::Model,
};

use crate::{
    cli::Cli,
    env::{Env, OnMissing},
    output::OutputSink,
};

pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Everything one run needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub prompt_file: PathBuf,
    pub input_file: PathBuf,
    pub schema_file: Option<PathBuf>,
    pub output: OutputSink,
    pub model: Model,
    pub plain: bool,
    pub base_url: Option<String>,
}

impl RunConfig {
    /// Config for the given documents with defaults everywhere else.
    pub fn new(prompt_file: impl Into<PathBuf>, input_file: impl Into<PathBuf>) -> Self {
        Self {
            api_key: String::new(),
            prompt_file: prompt_file.into(),
            input_file: input_file.into(),
            schema_file: None,
            output: OutputSink::Stdout,
            model: Model::default(),
            plain: false,
            base_url: None,
        }
    }

    /// Combine parsed flags with the environment.
    ///
    /// `GEMINI_API_KEY` is mandatory; the model falls back from `--model`
    /// to `GEMINI_MODEL` to the built-in default.
    pub fn from_cli(cli: Cli, env: &Env) -> Result<Self> {
        let api_key = env.string(API_KEY_ENV, OnMissing::Fail)?;

        let model_name = match cli.model {
            Some(model) => model,
            None => env.string(MODEL_ENV, OnMissing::Default(Model::default().to_string()))?,
        };
        if model_name.trim().is_empty() {
            return Err(GemmaError::Configuration(
                "model name must not be empty".into(),
            ));
        }
        let Ok(model) = model_name.parse::<Model>();

        let base_url = Some(env.string(BASE_URL_ENV, OnMissing::Default(String::new()))?)
            .filter(|url| !url.is_empty());

        Ok(Self {
            api_key,
            prompt_file: cli.prompt,
            input_file: cli.input,
            schema_file: cli.schema,
            output: OutputSink::from_path(cli.output),
            model,
            plain: cli.plain,
            base_url,
        })
    }
}
