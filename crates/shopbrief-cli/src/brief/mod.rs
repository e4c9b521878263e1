//! Brief command handlers for the CLI.
//!
//! `parse` and `reason` are pure text transforms. `render` and `export` load a
//! briefs CSV and call the configured summary generator, or the offline fact
//! joiner with `--offline`.

mod commands;

use std::path::PathBuf;

use clap::Subcommand;

pub(crate) use commands::{run_brief_export, run_brief_parse, run_brief_reason, run_brief_render};

/// Sub-commands available under `brief`.
#[derive(Debug, Subcommand)]
pub enum BriefCommands {
    /// Parse a brief and print it as JSON
    Parse {
        /// Brief text file, or `-` for stdin
        input: String,
    },
    /// Normalize a raw complaint reason into one sentence
    Reason {
        /// Raw reason text
        text: String,
    },
    /// Render the markdown summary page for one or every category
    Render {
        /// Briefs CSV with `category` and `brief` columns
        #[arg(long)]
        csv: PathBuf,
        /// Category to render; every category when omitted
        #[arg(long)]
        category: Option<String>,
        /// Skip the text-generation server and summarize from facts only
        #[arg(long)]
        offline: bool,
    },
    /// Write the summaries export JSON for every category
    Export {
        /// Briefs CSV with `category` and `brief` columns
        #[arg(long)]
        csv: PathBuf,
        /// Output JSON path
        #[arg(long)]
        out: PathBuf,
        /// Skip the text-generation server and summarize from facts only
        #[arg(long)]
        offline: bool,
    },
}
