//! Shared configuration and file types for the shopbrief tools.

pub mod app_config;
pub mod config;
pub mod summaries;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, GenerationSettings, SampleSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use summaries::{
    read_summaries, ProductStats, ProductSummary, SummariesError, SummariesFile,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
