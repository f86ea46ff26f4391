use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read input {path:?}: {source}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {row_index} has {field_count} fields, expected at least {expected}")]
    MalformedRow {
        row_index: usize,
        field_count: usize,
        expected: usize,
    },

    #[error("failed to write output {path:?}: {source}")]
    UnwritableOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write run report {path:?}: {message}")]
    Report { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
