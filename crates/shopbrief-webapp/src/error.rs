use thiserror::Error;

use shopbrief_core::SummariesError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no review data found; expected one of:\n  {clustered}\n  {cleaned}")]
    MissingInput { clustered: String, cleaned: String },

    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error(transparent)]
    Summaries(#[from] SummariesError),

    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
