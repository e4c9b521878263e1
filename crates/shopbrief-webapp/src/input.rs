//! Loading the review dataset and the optional side files next to it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use shopbrief_core::{read_summaries, SummariesFile};

use crate::error::DataError;

pub const CLUSTERED_FILE: &str = "data_with_clusters.csv";
pub const CLEANED_FILE: &str = "data_cleaned.csv";
pub const PREDICTIONS_FILE: &str = "data_with_predictions_v2.csv";
pub const SUMMARIES_FILE: &str = "summaries_api.json";
pub const PRODUCT_CLUSTERS_FILE: &str = "product_clusters.csv";

const REQUIRED_COLUMNS: [&str; 2] = ["name", "reviews.rating"];

/// One review after predictions are merged in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub cluster: Option<String>,
    /// Predicted label when predictions were merged, else the dataset's own
    /// `sentiment` column.
    pub sentiment: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: PathBuf,
    pub reviews: Vec<Review>,
    pub has_clusters: bool,
    pub has_predictions: bool,
    pub summaries: SummariesFile,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    name: Option<String>,
    #[serde(
        rename = "reviews.rating",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    rating: Option<f64>,
    #[serde(rename = "reviews.text", default)]
    text: Option<String>,
    #[serde(default)]
    cluster_name: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    predicted_label: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    predicted_score: Option<f64>,
}

/// Loads the reviews in `data_dir` together with predictions and summaries
/// when those files exist.
///
/// # Errors
///
/// Returns [`DataError::MissingInput`] when neither review file exists, and
/// the read and parse errors of the individual files otherwise.
pub fn load_dataset(data_dir: &Path) -> Result<Dataset, DataError> {
    let source = locate_reviews(data_dir)?;
    let (raw, has_clusters) = read_reviews(&source)?;
    tracing::info!(path = %source.display(), rows = raw.len(), "loaded reviews");

    let predictions_path = data_dir.join(PREDICTIONS_FILE);
    let predictions = if predictions_path.exists() {
        read_predictions(&predictions_path)?
    } else {
        None
    };
    let has_predictions = predictions.is_some();
    if has_predictions {
        tracing::info!(path = %predictions_path.display(), "merged predictions");
    }

    let reviews = merge_predictions(raw, predictions.as_deref());

    let summaries_path = data_dir.join(SUMMARIES_FILE);
    let summaries = if summaries_path.exists() {
        let summaries = read_summaries(&summaries_path)?;
        tracing::info!(
            path = %summaries_path.display(),
            clusters = summaries.cluster_summaries.len(),
            products = summaries.product_summaries.len(),
            "loaded summaries"
        );
        summaries
    } else {
        SummariesFile::default()
    };

    let product_clusters_path = data_dir.join(PRODUCT_CLUSTERS_FILE);
    if product_clusters_path.exists() {
        let rows = count_rows(&product_clusters_path)?;
        tracing::info!(path = %product_clusters_path.display(), rows, "found product clusters");
    }

    Ok(Dataset {
        source,
        reviews,
        has_clusters,
        has_predictions,
        summaries,
    })
}

fn locate_reviews(data_dir: &Path) -> Result<PathBuf, DataError> {
    let clustered = data_dir.join(CLUSTERED_FILE);
    if clustered.exists() {
        return Ok(clustered);
    }
    let cleaned = data_dir.join(CLEANED_FILE);
    if cleaned.exists() {
        return Ok(cleaned);
    }
    Err(DataError::MissingInput {
        clustered: clustered.display().to_string(),
        cleaned: cleaned.display().to_string(),
    })
}

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file))
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> DataError + '_ {
    move |source| DataError::Csv {
        path: path.display().to_string(),
        source,
    }
}

/// Returns the rows and whether the file carries a `cluster_name` column.
fn read_reviews(path: &Path) -> Result<(Vec<RawReview>, bool), DataError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(csv_error(path))?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn {
                path: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }
    let has_clusters = headers.iter().any(|h| h == "cluster_name");

    let rows = reader
        .deserialize::<RawReview>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error(path))?;
    Ok((rows, has_clusters))
}

/// `None` when the file has no `predicted_label` column.
fn read_predictions(path: &Path) -> Result<Option<Vec<Prediction>>, DataError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(csv_error(path))?;
    if !headers.iter().any(|h| h == "predicted_label") {
        tracing::warn!(path = %path.display(), "predictions file has no predicted_label column; ignoring");
        return Ok(None);
    }

    let rows = reader
        .deserialize::<Prediction>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error(path))?;
    Ok(Some(rows))
}

fn count_rows(path: &Path) -> Result<usize, DataError> {
    let mut reader = open_csv(path)?;
    let mut rows = 0;
    for record in reader.records() {
        record.map_err(csv_error(path))?;
        rows += 1;
    }
    Ok(rows)
}

/// Predictions line up with reviews by row position. Reviews past the end of
/// the predictions get no label.
fn merge_predictions(raw: Vec<RawReview>, predictions: Option<&[Prediction]>) -> Vec<Review> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let (sentiment, confidence) = match predictions {
                Some(preds) => preds.get(idx).map_or((None, None), |p| {
                    (p.predicted_label.clone(), p.predicted_score)
                }),
                None => (row.sentiment, None),
            };
            Review {
                name: row.name,
                rating: row.rating,
                text: row.text,
                cluster: row.cluster_name,
                sentiment,
                confidence,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn missing_inputs_name_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(CLUSTERED_FILE));
        assert!(message.contains(CLEANED_FILE));
    }

    #[test]
    fn prefers_clustered_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CLEANED_FILE, "name,reviews.rating\nA,1\n");
        write(
            dir.path(),
            CLUSTERED_FILE,
            "name,reviews.rating,cluster_name\nB,5,Tablets\n",
        );

        let dataset = load_dataset(dir.path()).unwrap();
        assert!(dataset.source.ends_with(CLUSTERED_FILE));
        assert!(dataset.has_clusters);
        assert_eq!(dataset.reviews[0].name.as_deref(), Some("B"));
        assert_eq!(dataset.reviews[0].cluster.as_deref(), Some("Tablets"));
    }

    #[test]
    fn falls_back_to_cleaned_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            CLEANED_FILE,
            "name,reviews.rating,reviews.text,sentiment\nA,4,Great stuff,positive\n",
        );

        let dataset = load_dataset(dir.path()).unwrap();
        assert!(dataset.source.ends_with(CLEANED_FILE));
        assert!(!dataset.has_clusters);
        assert!(!dataset.has_predictions);
        assert_eq!(dataset.reviews[0].sentiment.as_deref(), Some("positive"));
        assert_eq!(dataset.reviews[0].rating, Some(4.0));
    }

    #[test]
    fn missing_rating_column_is_named() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CLEANED_FILE, "name,reviews.text\nA,hello\n");
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column, .. } if column == "reviews.rating"));
    }

    #[test]
    fn unparseable_and_empty_ratings_become_none() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            CLEANED_FILE,
            "name,reviews.rating\nA,\nB,five\nC,3.5\n",
        );
        let dataset = load_dataset(dir.path()).unwrap();
        let ratings: Vec<_> = dataset.reviews.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, [None, None, Some(3.5)]);
    }

    #[test]
    fn predictions_merge_by_position() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            CLEANED_FILE,
            "name,reviews.rating,sentiment\nA,5,negative\nB,1,positive\nC,3,neutral\n",
        );
        write(
            dir.path(),
            PREDICTIONS_FILE,
            "predicted_label,predicted_score\nPOSITIVE,0.91\nnegative,0.77\n",
        );

        let dataset = load_dataset(dir.path()).unwrap();
        assert!(dataset.has_predictions);
        let merged: Vec<_> = dataset
            .reviews
            .iter()
            .map(|r| (r.sentiment.as_deref(), r.confidence))
            .collect();
        assert_eq!(
            merged,
            [
                (Some("POSITIVE"), Some(0.91)),
                (Some("negative"), Some(0.77)),
                (None, None),
            ]
        );
    }

    #[test]
    fn predictions_without_label_column_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            CLEANED_FILE,
            "name,reviews.rating,sentiment\nA,5,positive\n",
        );
        write(dir.path(), PREDICTIONS_FILE, "score\n0.5\n");

        let dataset = load_dataset(dir.path()).unwrap();
        assert!(!dataset.has_predictions);
        assert_eq!(dataset.reviews[0].sentiment.as_deref(), Some("positive"));
    }

    #[test]
    fn summaries_are_loaded_when_present() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CLEANED_FILE, "name,reviews.rating\nA,5\n");
        write(
            dir.path(),
            SUMMARIES_FILE,
            r#"{"model":"m","cluster_summaries":{"Tablets":"Good."}}"#,
        );

        let dataset = load_dataset(dir.path()).unwrap();
        assert_eq!(dataset.summaries.model.as_deref(), Some("m"));
        assert_eq!(dataset.summaries.cluster_summaries["Tablets"], "Good.");
    }

    #[test]
    fn malformed_summaries_fail() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CLEANED_FILE, "name,reviews.rating\nA,5\n");
        write(dir.path(), SUMMARIES_FILE, "{not json");
        assert!(matches!(
            load_dataset(dir.path()),
            Err(DataError::Summaries(_))
        ));
    }
}
