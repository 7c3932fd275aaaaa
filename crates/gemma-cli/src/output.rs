use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use gemma::error::{GemmaError, Result};

/// Where the rendered answer goes. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    /// Overwritten, never appended to.
    File(PathBuf),
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Stdout, OutputSink::File)
    }

    /// Write `rendered` once. Files get the bytes as-is; stdout gets a
    /// trailing newline.
    pub fn emit(&self, rendered: &str, stdout: &mut impl Write) -> Result<()> {
        match self {
            OutputSink::File(path) => {
                fs::write(path, rendered).map_err(|err| GemmaError::io(path, err))
            }
            OutputSink::Stdout => writeln!(stdout, "{rendered}")
                .and_then(|()| stdout.flush())
                .map_err(|err| GemmaError::io(Path::new("<stdout>"), err)),
        }
    }
}
