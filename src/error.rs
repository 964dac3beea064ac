use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a plotting run.  All variants are fatal.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("missing input file argument")]
    MissingArgument,

    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no latency samples in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("cannot write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rendering failed: {0}")]
    Render(String),
}

impl PlotError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PlotError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
