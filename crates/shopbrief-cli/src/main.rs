mod brief;
mod webapp;

use clap::{Parser, Subcommand};
use shopbrief_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::brief::BriefCommands;
use crate::webapp::WebappCommands;

#[derive(Debug, Parser)]
#[command(name = "shopbrief")]
#[command(about = "Category brief parsing, summaries, and dashboard data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse briefs and build category summaries
    Brief {
        #[command(subcommand)]
        command: BriefCommands,
    },
    /// Generate the static dashboard data
    Webapp {
        #[command(subcommand)]
        command: WebappCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(std::env::var("SHOPBRIEF_LOG_LEVEL").unwrap_or_else(|_| "info".into()))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli, || Ok(shopbrief_core::load_app_config_from_env()?)).await
}

/// Dispatches a parsed command. `load_config` runs only for commands that
/// read configuration, so a bad variable cannot break the pure transforms.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: Fn() -> anyhow::Result<AppConfig>,
{
    match cli.command {
        Some(Commands::Brief { command }) => match command {
            BriefCommands::Parse { input } => brief::run_brief_parse(&input)?,
            BriefCommands::Reason { text } => brief::run_brief_reason(&text),
            BriefCommands::Render {
                csv,
                category,
                offline,
            } => {
                let config = load_config()?;
                brief::run_brief_render(&config, &csv, category.as_deref(), offline).await?;
            }
            BriefCommands::Export { csv, out, offline } => {
                let config = load_config()?;
                brief::run_brief_export(&config, &csv, &out, offline).await?;
            }
        },
        Some(Commands::Webapp { command }) => match command {
            WebappCommands::Generate {
                data_dir,
                output_dir,
                seed,
            } => {
                let config = load_config()?;
                webapp::run_webapp_generate(&config, data_dir, output_dir, seed)?;
            }
        },
        None => println!("shopbrief: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
