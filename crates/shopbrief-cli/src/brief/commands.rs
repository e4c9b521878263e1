use std::io::Read;
use std::path::Path;

use shopbrief_brief::{parse_brief, prettify_reason, write_export, BriefSession};
use shopbrief_core::AppConfig;
use shopbrief_generator::AnyGenerator;

/// Separates category pages when several are rendered at once.
const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Read brief text from a file path, or from stdin when `input` is `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub(crate) fn read_brief_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("failed to read brief file {input}: {e}"))
}

/// Parse a brief and print the structured result as pretty JSON.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub(crate) fn run_brief_parse(input: &str) -> anyhow::Result<()> {
    let text = read_brief_input(input)?;
    let parsed = parse_brief(&text);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

pub(crate) fn run_brief_reason(text: &str) {
    println!("{}", prettify_reason(text));
}

/// Render markdown pages for `category`, or for every category in name order.
///
/// # Errors
///
/// Returns an error if the CSV cannot be loaded, the category is unknown, or
/// summary generation fails.
pub(crate) async fn run_brief_render(
    config: &AppConfig,
    csv: &Path,
    category: Option<&str>,
    offline: bool,
) -> anyhow::Result<()> {
    let session = BriefSession::from_csv_path(csv)?;
    let generator = AnyGenerator::from_config(config, offline)?;

    let categories: Vec<&str> = match category {
        Some(c) => vec![c],
        None => session.categories(),
    };
    if categories.is_empty() {
        println!("no categories found in {}", csv.display());
        return Ok(());
    }

    let mut pages = Vec::with_capacity(categories.len());
    for name in categories {
        pages.push(session.render_category(name, &generator).await?);
    }
    println!("{}", pages.join(PAGE_SEPARATOR));
    Ok(())
}

/// Build the summaries export and write it to `out`.
///
/// # Errors
///
/// Returns an error if the CSV cannot be loaded, generation fails, or the
/// output cannot be written.
pub(crate) async fn run_brief_export(
    config: &AppConfig,
    csv: &Path,
    out: &Path,
    offline: bool,
) -> anyhow::Result<()> {
    let session = BriefSession::from_csv_path(csv)?;
    let generator = AnyGenerator::from_config(config, offline)?;

    let export = session.export(&generator).await?;
    write_export(&export, out)?;

    println!(
        "wrote {} categories and {} products to {}",
        export.cluster_summaries.len(),
        export.product_summaries.len(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRIEFS_CSV: &str = "category,brief\n\
        Tablets,\"CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Fire HD 8 | rating = 4.6, reviews = 800\"\n";

    #[test]
    fn read_brief_input_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.txt");
        std::fs::write(&path, "CATEGORY: Tablets").unwrap();

        let text = read_brief_input(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "CATEGORY: Tablets");
    }

    #[test]
    fn read_brief_input_names_missing_file() {
        let err = read_brief_input("/nonexistent/brief.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/brief.txt"));
    }

    #[tokio::test]
    async fn export_writes_file_offline() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("briefs.csv");
        let out = dir.path().join("summaries_api.json");
        std::fs::write(&csv, BRIEFS_CSV).unwrap();

        run_brief_export(&AppConfig::default(), &csv, &out, true)
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["provider"], "local");
        assert!(json["cluster_summaries"]["Tablets"].is_string());
    }

    #[tokio::test]
    async fn render_unknown_category_fails() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("briefs.csv");
        std::fs::write(&csv, BRIEFS_CSV).unwrap();

        let err = run_brief_render(&AppConfig::default(), &csv, Some("Speakers"), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Speakers"));
    }
}
