//! Static-site data generator.
//!
//! Reads the review dataset (plus predictions and summaries when present) and
//! writes the four JSON files the dashboard loads: `stats.json`,
//! `clusters.json`, `products.json`, and `reviews_sample.json`.

pub mod aggregate;
pub mod error;
pub mod input;
pub mod sample;

use std::path::{Path, PathBuf};

use serde::Serialize;
use shopbrief_core::SampleSettings;

pub use aggregate::{build_clusters, build_products, build_stats};
pub use error::DataError;
pub use input::{load_dataset, Dataset, Review};
pub use sample::{build_reviews_sample, SampledReview};

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub reviews: usize,
    pub clusters: usize,
    pub products: usize,
    pub sampled_reviews: usize,
}

/// Builds every dashboard file from the data in `data_dir` and writes them
/// into `output_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`DataError`] if the inputs cannot be loaded or an output cannot
/// be written.
pub fn generate_site(
    data_dir: &Path,
    output_dir: &Path,
    sample: SampleSettings,
) -> Result<SiteReport, DataError> {
    let dataset = load_dataset(data_dir)?;

    std::fs::create_dir_all(output_dir).map_err(|e| DataError::Write {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let stats = build_stats(&dataset);
    write_json(output_dir, "stats.json", &stats)?;

    let clusters = build_clusters(&dataset);
    write_json(output_dir, "clusters.json", &clusters)?;

    let products = build_products(&dataset);
    write_json(output_dir, "products.json", &products)?;

    let reviews_sample = build_reviews_sample(&dataset, sample);
    write_json(output_dir, "reviews_sample.json", &reviews_sample)?;

    let report = SiteReport {
        source: dataset.source,
        output_dir: output_dir.to_path_buf(),
        reviews: stats.total_reviews,
        clusters: clusters.len(),
        products: products.len(),
        sampled_reviews: reviews_sample.len(),
    };
    tracing::info!(
        output_dir = %report.output_dir.display(),
        clusters = report.clusters,
        products = report.products,
        sampled_reviews = report.sampled_reviews,
        "webapp data generated"
    );
    Ok(report)
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), DataError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DataError::Serialize {
        name: name.to_string(),
        source: e,
    })?;
    let path = dir.join(name);
    std::fs::write(&path, json).map_err(|e| DataError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote webapp file");
    Ok(())
}
