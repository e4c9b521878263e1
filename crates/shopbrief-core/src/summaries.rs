//! The precomputed summaries file (`summaries_api.json`).
//!
//! Written by the briefs export and read by the static-site generator.
//! Maps keep insertion order so the JSON matches what was exported.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummariesError {
    #[error("failed to read summaries file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse summaries file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-product statistics. Sentiment percentages are not computed by the
/// briefs export and stay `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    #[serde(default)]
    pub total_reviews: Option<u64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub pct_positive: Option<f64>,
    #[serde(default)]
    pub pct_negative: Option<f64>,
    #[serde(default)]
    pub pct_neutral: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub stats: ProductStats,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummariesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub cluster_summaries: IndexMap<String, String>,
    #[serde(default)]
    pub product_summaries: IndexMap<String, ProductSummary>,
}

impl SummariesFile {
    /// Summary text for a product, or `""` when the product is unknown.
    #[must_use]
    pub fn product_summary_text(&self, product: &str) -> &str {
        self.product_summaries
            .get(product)
            .map_or("", |p| p.summary.as_str())
    }
}

/// Read and parse a summaries file.
///
/// # Errors
///
/// Returns [`SummariesError`] naming the path if the file cannot be read or
/// is not valid summaries JSON.
pub fn read_summaries(path: &Path) -> Result<SummariesFile, SummariesError> {
    let content = std::fs::read_to_string(path).map_err(|e| SummariesError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| SummariesError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
