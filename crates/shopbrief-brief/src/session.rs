//! A loaded set of category briefs.
//!
//! Callers hold a [`BriefSession`] for as long as they work with one upload
//! and pass it to whatever needs the rows.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use shopbrief_core::SummariesFile;

use crate::error::SessionError;
use crate::export::build_export;
use crate::generate::{build_full_markdown, SummaryGenerator};
use crate::parse::parse_brief;

const REQUIRED_COLUMNS: [&str; 2] = ["category", "brief"];

/// One row of a briefs CSV. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BriefRow {
    pub category: String,
    pub brief: String,
}

#[derive(Debug, Clone, Default)]
pub struct BriefSession {
    rows: Vec<BriefRow>,
}

impl BriefSession {
    #[must_use]
    pub fn from_rows(rows: Vec<BriefRow>) -> Self {
        Self { rows }
    }

    /// Loads rows from CSV data with `category` and `brief` columns.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingColumn`] if a required column is absent,
    /// or [`SessionError::Csv`] on malformed CSV.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SessionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(SessionError::MissingColumn(column.to_string()));
            }
        }

        let rows = csv_reader
            .deserialize::<BriefRow>()
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(rows = rows.len(), "loaded briefs");
        Ok(Self { rows })
    }

    /// Loads rows from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] naming the path if it cannot be opened,
    /// plus the errors of [`BriefSession::from_csv_reader`].
    pub fn from_csv_path(path: &Path) -> Result<Self, SessionError> {
        let file = std::fs::File::open(path).map_err(|e| SessionError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    #[must_use]
    pub fn rows(&self) -> &[BriefRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The brief of the first row with this category.
    #[must_use]
    pub fn brief_for(&self, category: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.brief.as_str())
    }

    /// Builds the markdown page for one category.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownCategory`] if no row has the category,
    /// or [`SessionError::Generate`] if the generator fails.
    pub async fn render_category<G: SummaryGenerator>(
        &self,
        category: &str,
        generator: &G,
    ) -> Result<String, SessionError> {
        let brief = self
            .brief_for(category)
            .ok_or_else(|| SessionError::UnknownCategory(category.to_string()))?;
        let parsed = parse_brief(brief);
        Ok(build_full_markdown(&parsed, generator).await?)
    }

    /// Builds the summaries export for every row.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Generate`] if any summary fails to generate.
    pub async fn export<G: SummaryGenerator>(
        &self,
        generator: &G,
    ) -> Result<SummariesFile, SessionError> {
        build_export(&self.rows, generator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::FactsOnly;

    const CSV: &str = "category,brief,notes\n\
        Tablets,\"CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Fire HD 8 | rating = 4.6, reviews = 800\",x\n\
        E-Readers,\"CATEGORY: E-Readers\nTOP 3 PRODUCTS:\n1) Kindle | rating = 4.8, reviews = 3000\",y\n\
        Tablets,\"CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Fire 7 | rating = 4.1, reviews = 90\",z\n";

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let session = BriefSession::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.rows()[1].category, "E-Readers");
        assert!(session.rows()[1].brief.contains("Kindle"));
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let session = BriefSession::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(session.categories(), ["E-Readers", "Tablets"]);
    }

    #[test]
    fn brief_for_returns_first_matching_row() {
        let session = BriefSession::from_csv_reader(CSV.as_bytes()).unwrap();
        let brief = session.brief_for("Tablets").unwrap();
        assert!(brief.contains("Fire HD 8"));
        assert!(session.brief_for("Speakers").is_none());
    }

    #[test]
    fn missing_brief_column_is_named() {
        let err = BriefSession::from_csv_reader("category,text\nTablets,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SessionError::MissingColumn(ref c) if c == "brief"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = BriefSession::from_csv_path(Path::new("/nonexistent/briefs.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/briefs.csv"));
    }

    #[tokio::test]
    async fn render_category_builds_markdown() {
        let session = BriefSession::from_csv_reader(CSV.as_bytes()).unwrap();
        let md = session.render_category("E-Readers", &FactsOnly).await.unwrap();
        assert!(md.starts_with("# E-Readers"));
        assert!(md.contains("**Kindle**"));
    }

    #[tokio::test]
    async fn render_unknown_category_fails() {
        let session = BriefSession::from_csv_reader(CSV.as_bytes()).unwrap();
        let err = session
            .render_category("Speakers", &FactsOnly)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownCategory(ref c) if c == "Speakers"));
    }

    #[tokio::test]
    async fn from_rows_exports_every_category() {
        let session = BriefSession::from_rows(vec![
            BriefRow {
                category: "Speakers".to_string(),
                brief: "CATEGORY: Speakers\nTOP 3 PRODUCTS:\n1) Echo Dot | rating = 4.7, reviews = 5000".to_string(),
            },
            BriefRow {
                category: "Tablets".to_string(),
                brief: "CATEGORY: Tablets".to_string(),
            },
        ]);
        assert_eq!(session.len(), 2);
        assert_eq!(session.categories(), ["Speakers", "Tablets"]);

        let export = session.export(&FactsOnly).await.unwrap();
        assert_eq!(export.cluster_summaries.len(), 2);
        assert_eq!(
            export.product_summaries["Echo Dot"].stats.total_reviews,
            Some(5000)
        );
    }
}
