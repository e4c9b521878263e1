//! The seeded review sample behind the explorer page.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use serde::Serialize;
use shopbrief_core::SampleSettings;

use crate::aggregate::{group_by_cluster, round_to};
use crate::input::{Dataset, Review};

const SAMPLE_LABELS: [&str; 3] = ["POSITIVE", "NEGATIVE", "NEUTRAL"];
const MIN_TEXT_CHARS: usize = 5;
const MAX_TEXT_CHARS: usize = 500;
const MAX_PRODUCT_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledReview {
    pub text: String,
    pub rating: i64,
    pub sentiment: String,
    pub product: String,
    pub cluster: String,
    pub confidence: Option<f64>,
}

/// Draws up to `per_label` reviews for every cluster and sentiment label,
/// shuffles them, and keeps at most `cap`. The same seed yields the same
/// sample.
#[must_use]
pub fn build_reviews_sample(dataset: &Dataset, settings: SampleSettings) -> Vec<SampledReview> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut sample = Vec::new();

    for (cluster, group) in group_by_cluster(dataset) {
        for label in SAMPLE_LABELS {
            let candidates: Vec<&Review> = group
                .iter()
                .copied()
                .filter(|r| {
                    r.sentiment
                        .as_deref()
                        .is_some_and(|s| s.to_uppercase() == label)
                })
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let amount = settings.per_label.min(candidates.len());
            for idx in index::sample(&mut rng, candidates.len(), amount) {
                let review = candidates[idx];
                let text = review.text.as_deref().unwrap_or_default();
                if text.trim().chars().count() < MIN_TEXT_CHARS {
                    continue;
                }
                sample.push(SampledReview {
                    text: truncate_chars(text, MAX_TEXT_CHARS),
                    rating: integer_rating(review.rating),
                    sentiment: label.to_string(),
                    product: truncate_chars(
                        review.name.as_deref().unwrap_or("Unknown"),
                        MAX_PRODUCT_CHARS,
                    ),
                    cluster: cluster.to_string(),
                    confidence: if dataset.has_predictions {
                        review.confidence.map(|c| round_to(c, 3))
                    } else {
                        None
                    },
                });
            }
        }
    }

    sample.shuffle(&mut rng);
    sample.truncate(settings.cap);
    tracing::debug!(reviews = sample.len(), seed = settings.seed, "sampled reviews");
    sample
}

#[allow(clippy::cast_possible_truncation)]
fn integer_rating(rating: Option<f64>) -> i64 {
    rating.map_or(0, |r| r.trunc() as i64)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
