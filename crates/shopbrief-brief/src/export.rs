//! Summaries export: one markdown page per category plus a short summary for
//! every top product named in the briefs.

use std::path::Path;

use indexmap::IndexMap;
use shopbrief_core::{ProductStats, ProductSummary, SummariesFile};

use crate::error::SessionError;
use crate::generate::{build_full_markdown, SummaryGenerator};
use crate::markdown::product_fact;
use crate::parse::parse_brief;
use crate::session::BriefRow;

/// Builds the export for `rows` in order. A later row with the same category
/// or product name replaces the earlier entry in place.
///
/// # Errors
///
/// Returns [`SessionError::Generate`] if a category summary fails.
pub async fn build_export<G: SummaryGenerator>(
    rows: &[BriefRow],
    generator: &G,
) -> Result<SummariesFile, SessionError> {
    let mut cluster_summaries = IndexMap::new();
    let mut product_summaries = IndexMap::new();

    for row in rows {
        let parsed = parse_brief(&row.brief);
        let markdown = build_full_markdown(&parsed, generator).await?;
        cluster_summaries.insert(row.category.clone(), markdown);

        for product in &parsed.top_products {
            product_summaries.insert(
                product.name.clone(),
                ProductSummary {
                    cluster: row.category.clone(),
                    stats: ProductStats {
                        total_reviews: product.review_count,
                        avg_rating: product.rating,
                        ..ProductStats::default()
                    },
                    summary: product_fact(product),
                },
            );
        }
    }

    tracing::info!(
        categories = cluster_summaries.len(),
        products = product_summaries.len(),
        model = generator.model_name(),
        "built summaries export"
    );

    Ok(SummariesFile {
        provider: Some(generator.provider().to_string()),
        model: Some(generator.model_name().to_string()),
        cluster_summaries,
        product_summaries,
    })
}

/// Writes an export as pretty-printed UTF-8 JSON.
///
/// # Errors
///
/// Returns [`SessionError::Write`] naming the path if the file cannot be
/// written.
pub fn write_export(export: &SummariesFile, path: &Path) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(path, json).map_err(|e| SessionError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "wrote summaries export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::FactsOnly;

    fn rows() -> Vec<BriefRow> {
        vec![
            BriefRow {
                category: "Tablets".to_string(),
                brief: "CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Fire HD 8 | rating = 4.6, reviews = 800\n2) Fire 7\nWORST PRODUCT: Fire Kids | rating = 3.2, reviews = 40\navoid because: slow; lag".to_string(),
            },
            BriefRow {
                category: "Écrans".to_string(),
                brief: "CATEGORY: Écrans\nTOP 3 PRODUCTS:\n1) Fire 7 | rating = 4.1, reviews = 90".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn export_keys_categories_and_products() {
        let export = build_export(&rows(), &FactsOnly).await.unwrap();

        assert_eq!(export.provider.as_deref(), Some("local"));
        assert_eq!(export.model.as_deref(), Some("facts-only"));

        let categories: Vec<&str> = export.cluster_summaries.keys().map(String::as_str).collect();
        assert_eq!(categories, ["Tablets", "Écrans"]);
        assert!(export.cluster_summaries["Tablets"].contains("## Avoid / Lowest Rated"));

        let products: Vec<&str> = export.product_summaries.keys().map(String::as_str).collect();
        assert_eq!(products, ["Fire HD 8", "Fire 7"]);

        let hd8 = &export.product_summaries["Fire HD 8"];
        assert_eq!(hd8.cluster, "Tablets");
        assert_eq!(hd8.stats.total_reviews, Some(800));
        assert_eq!(hd8.stats.avg_rating, Some(4.6));
        assert!(hd8.stats.pct_positive.is_none());
        assert_eq!(hd8.summary, "Fire HD 8 has rating 4.6 from 800 reviews.");
    }

    #[tokio::test]
    async fn later_rows_replace_earlier_products() {
        let export = build_export(&rows(), &FactsOnly).await.unwrap();
        let fire7 = &export.product_summaries["Fire 7"];
        assert_eq!(fire7.cluster, "Écrans");
        assert_eq!(fire7.stats.total_reviews, Some(90));
    }

    #[tokio::test]
    async fn empty_rows_export_empty_maps() {
        let export = build_export(&[], &FactsOnly).await.unwrap();
        assert!(export.cluster_summaries.is_empty());
        assert!(export.product_summaries.is_empty());
    }

    #[tokio::test]
    async fn write_export_keeps_non_ascii_and_nulls() {
        let export = build_export(&rows(), &FactsOnly).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        write_export(&export, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Écrans"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["provider"], "local");
        assert!(value["product_summaries"]["Fire 7"]["stats"]["pct_neutral"].is_null());
        let reread: SummariesFile = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, export);
    }

    #[test]
    fn write_export_names_unwritable_path() {
        let err = write_export(
            &SummariesFile::default(),
            Path::new("/nonexistent-dir/export.json"),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::Write { .. }));
        assert!(err.to_string().contains("/nonexistent-dir/export.json"));
    }
}
