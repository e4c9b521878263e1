use thiserror::Error;

use crate::generate::GenerateError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read briefs file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("briefs CSV is missing required column '{0}'")]
    MissingColumn(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
