//! Environment lookups with an optional dotenv overlay.
//!
//! Values from the env file win over the process environment. The process
//! environment itself is never modified; the overlay only lives in [`Env`].
//!
//! Every lookup says what should happen when the variable is missing via
//! [`OnMissing`], so a fail-fast lookup and a lookup with a fallback can sit
//! side by side.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use gemma::error::{GemmaError, Result};

/// Env file read when `--env-file` isn't given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// What a lookup does when the variable is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnMissing<T> {
    /// Report a [`GemmaError::Configuration`] naming the variable.
    Fail,
    /// Use this value instead.
    Default(T),
}

#[derive(Debug, Clone, Default)]
pub struct Env {
    overlay: HashMap<String, String>,
}

impl Env {
    /// Load the overlay from `path`, or from [`DEFAULT_ENV_FILE`] when no
    /// path is given. A missing default file is fine; a missing file the
    /// caller asked for is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_ENV_FILE), false),
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        // Only the iterator leaves the process environment untouched.
        #[allow(deprecated)]
        let iter = dotenv::from_path_iter(&path).map_err(|err| env_file_error(&path, err))?;

        let mut overlay = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|err| env_file_error(&path, err))?;
            overlay.insert(key, value);
        }

        tracing::debug!(path = %path.display(), variables = overlay.len(), "loaded env file");
        Ok(Self { overlay })
    }

    /// Build an overlay from explicit pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overlay: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Raw lookup: overlay first, then the process environment. Empty
    /// values count as missing.
    pub fn get(&self, key: &str) -> Option<String> {
        self.overlay
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .filter(|value| !value.is_empty())
    }

    pub fn string(&self, key: &str, on_missing: OnMissing<String>) -> Result<String> {
        match (self.get(key), on_missing) {
            (Some(value), _) => Ok(value),
            (None, OnMissing::Default(fallback)) => Ok(fallback),
            (None, OnMissing::Fail) => Err(missing(key)),
        }
    }

    /// Integer lookup. A value that does not parse is treated like a
    /// missing one: an error under [`OnMissing::Fail`], the fallback
    /// otherwise.
    pub fn int(&self, key: &str, on_missing: OnMissing<i64>) -> Result<i64> {
        self.parsed(key, on_missing, "an integer", |raw| raw.trim().parse().ok())
    }

    /// Boolean lookup accepting `1`/`0`, `t`/`f` and `true`/`false` in
    /// any case.
    pub fn bool(&self, key: &str, on_missing: OnMissing<bool>) -> Result<bool> {
        self.parsed(key, on_missing, "a boolean", parse_bool)
    }

    /// Split the value on `sep`. Pieces are kept verbatim, empty ones
    /// included.
    pub fn list(
        &self,
        key: &str,
        sep: &str,
        on_missing: OnMissing<Vec<String>>,
    ) -> Result<Vec<String>> {
        match (self.get(key), on_missing) {
            (Some(value), _) => Ok(value.split(sep).map(str::to_string).collect()),
            (None, OnMissing::Default(fallback)) => Ok(fallback),
            (None, OnMissing::Fail) => Err(missing(key)),
        }
    }

    fn parsed<T>(
        &self,
        key: &str,
        on_missing: OnMissing<T>,
        expected: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T> {
        let Some(raw) = self.get(key) else {
            return match on_missing {
                OnMissing::Default(fallback) => Ok(fallback),
                OnMissing::Fail => Err(missing(key)),
            };
        };

        match (parse(&raw), on_missing) {
            (Some(value), _) => Ok(value),
            (None, OnMissing::Default(fallback)) => {
                tracing::debug!(key, value = %raw, "unparsable value, using fallback");
                Ok(fallback)
            }
            (None, OnMissing::Fail) => Err(GemmaError::Configuration(format!(
                "environment variable `{key}` must be {expected}, got `{raw}`"
            ))),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

fn missing(key: &str) -> GemmaError {
    GemmaError::Configuration(format!("environment variable `{key}` is required"))
}

fn env_file_error(path: &Path, err: dotenv::Error) -> GemmaError {
    match err {
        dotenv::Error::Io(source) => GemmaError::io(path, source),
        other => GemmaError::Configuration(format!(
            "invalid env file `{}`: {other}",
            path.display()
        )),
    }
}
