use super::*;

use std::path::PathBuf;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shopbrief"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_brief_parse_with_stdin() {
    let cli = Cli::try_parse_from(["shopbrief", "brief", "parse", "-"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Brief {
            command: BriefCommands::Parse { ref input }
        }) if input == "-"
    ));
}

#[test]
fn brief_parse_requires_input() {
    assert!(Cli::try_parse_from(["shopbrief", "brief", "parse"]).is_err());
}

#[test]
fn parses_brief_reason() {
    let cli = Cli::try_parse_from(["shopbrief", "brief", "reason", "slow; lag"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Brief {
            command: BriefCommands::Reason { ref text }
        }) if text == "slow; lag"
    ));
}

#[test]
fn parses_brief_render_defaults() {
    let cli = Cli::try_parse_from(["shopbrief", "brief", "render", "--csv", "briefs.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Brief {
            command: BriefCommands::Render {
                ref csv,
                category: None,
                offline: false,
            }
        }) if csv == &PathBuf::from("briefs.csv")
    ));
}

#[test]
fn parses_brief_render_with_category_offline() {
    let cli = Cli::try_parse_from([
        "shopbrief",
        "brief",
        "render",
        "--csv",
        "briefs.csv",
        "--category",
        "Tablets",
        "--offline",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Brief {
            command: BriefCommands::Render {
                category: Some(ref c),
                offline: true,
                ..
            }
        }) if c == "Tablets"
    ));
}

#[test]
fn brief_render_requires_csv() {
    assert!(Cli::try_parse_from(["shopbrief", "brief", "render"]).is_err());
}

#[test]
fn parses_brief_export() {
    let cli = Cli::try_parse_from([
        "shopbrief",
        "brief",
        "export",
        "--csv",
        "briefs.csv",
        "--out",
        "summaries_api.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Brief {
            command: BriefCommands::Export {
                ref out,
                offline: false,
                ..
            }
        }) if out == &PathBuf::from("summaries_api.json")
    ));
}

#[test]
fn brief_export_requires_out() {
    assert!(Cli::try_parse_from(["shopbrief", "brief", "export", "--csv", "briefs.csv"]).is_err());
}

#[test]
fn parses_webapp_generate_defaults() {
    let cli = Cli::try_parse_from(["shopbrief", "webapp", "generate"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Webapp {
            command: WebappCommands::Generate {
                data_dir: None,
                output_dir: None,
                seed: None,
            }
        })
    ));
}

#[test]
fn parses_webapp_generate_overrides() {
    let cli = Cli::try_parse_from([
        "shopbrief",
        "webapp",
        "generate",
        "--data-dir",
        "data",
        "--output-dir",
        "site/data",
        "--seed",
        "7",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Webapp {
            command: WebappCommands::Generate {
                data_dir: Some(ref d),
                output_dir: Some(ref o),
                seed: Some(7),
            }
        }) if d == &PathBuf::from("data") && o == &PathBuf::from("site/data")
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["shopbrief", "collect"]).is_err());
}

fn failing_config() -> anyhow::Result<AppConfig> {
    Err(shopbrief_core::ConfigError::InvalidEnvVar {
        var: "SHOPBRIEF_BIND_ADDR".to_string(),
        reason: "invalid socket address syntax".to_string(),
    }
    .into())
}

#[tokio::test]
async fn parse_and_reason_run_without_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brief.txt");
    std::fs::write(&path, "CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Fire HD 8").unwrap();
    let path = path.to_str().unwrap();

    let cli = Cli::try_parse_from(["shopbrief", "brief", "parse", path]).unwrap();
    run(cli, failing_config).await.unwrap();

    let cli = Cli::try_parse_from(["shopbrief", "brief", "reason", "slow; lag"]).unwrap();
    run(cli, failing_config).await.unwrap();
}

#[tokio::test]
async fn export_surfaces_config_errors() {
    let cli = Cli::try_parse_from([
        "shopbrief",
        "brief",
        "export",
        "--csv",
        "briefs.csv",
        "--out",
        "summaries_api.json",
        "--offline",
    ])
    .unwrap();
    let err = run(cli, failing_config).await.unwrap_err();
    assert!(err.to_string().contains("SHOPBRIEF_BIND_ADDR"));
}

#[tokio::test]
async fn no_command_does_not_load_config() {
    let cli = Cli::try_parse_from(["shopbrief"]).unwrap();
    run(cli, failing_config).await.unwrap();
}
