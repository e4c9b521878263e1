//! Static-site data generation for the dashboard.

use std::path::PathBuf;

use clap::Subcommand;
use shopbrief_core::AppConfig;

/// Sub-commands available under `webapp`.
#[derive(Debug, Subcommand)]
pub enum WebappCommands {
    /// Build stats, clusters, products and review-sample JSON files
    Generate {
        /// Directory holding the review CSVs and summaries file
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory the JSON files are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Seed for the review sample
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Generate the dashboard JSON files. Flags override the configured
/// directories and sample seed.
///
/// # Errors
///
/// Returns an error if the input data is missing or unreadable, or an output
/// file cannot be written.
pub(crate) fn run_webapp_generate(
    config: &AppConfig,
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let mut sample = config.sample;
    if let Some(seed) = seed {
        sample.seed = seed;
    }

    let report = shopbrief_webapp::generate_site(&data_dir, &output_dir, sample)?;

    println!("webapp data generated in {}", report.output_dir.display());
    println!("  source              {}", report.source.display());
    println!("  stats.json          {} reviews", report.reviews);
    println!("  clusters.json       {} clusters", report.clusters);
    println!("  products.json       {} products", report.products);
    println!("  reviews_sample.json {} reviews", report.sampled_reviews);
    Ok(())
}
