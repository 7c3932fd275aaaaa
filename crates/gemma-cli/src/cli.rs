//! Command-line flags.
//!
//! Flags are long options (`--prompt file.txt`). For compatibility with
//! existing scripts the single-dash spelling (`-prompt=file.txt`,
//! `-prompt file.txt`) is accepted as well; [`normalize_args`] rewrites it
//! before `clap` sees the arguments.
use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "gemma",
    version,
    about = "Send a prompt plus an input document to Gemini and emit a schema-constrained answer",
    after_help = "Environment variables:\n  GEMINI_API_KEY   Google Gemini API key (required)\n  GEMINI_MODEL     Model used when --model is absent\n  GEMINI_BASE_URL  Alternative API root\n  RUST_LOG         Log filter (default: warn)"
)]
pub struct Cli {
    /// Path to prompt file
    #[arg(long, value_name = "FILE")]
    pub prompt: PathBuf,

    /// Path to input file
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Model to use [default: gemini-1.5-flash]
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Path to JSON schema file (default: a single `message` string)
    #[arg(long, value_name = "FILE", conflicts_with = "plain")]
    pub schema: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip the schema and pass the model's text through unmodified
    #[arg(long)]
    pub plain: bool,

    /// dotenv file overlaid onto the process environment [default: .env]
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

const LONG_FLAGS: &[&str] = &[
    "prompt", "input", "model", "schema", "output", "plain", "env-file", "help", "version",
];

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value` for every
/// known long flag. The program name and anything after `--` stay as they are.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
