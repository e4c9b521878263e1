//! Dashboard aggregates: `stats.json`, `clusters.json`, and `products.json`.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::input::{Dataset, Review};

const CLASSIFICATION_MODEL: &str = "RoBERTa-base (Yelp→Amazon fine-tuned, class weights)";
const CLUSTERING_MODEL: &str = "TF-IDF + K-Means (K=6)";
const DEFAULT_SUMMARIZATION_MODEL: &str = "Claude Sonnet";
const DEFAULT_PROVIDER: &str = "anthropic";
const MISSING_SUMMARY: &str = "Summary not available.";
const UNKNOWN_CLUSTER: &str = "Unknown";
const TOP_PRODUCTS_PER_CLUSTER: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_reviews: usize,
    pub total_products: usize,
    pub total_clusters: usize,
    pub avg_rating: Option<f64>,
    pub sentiment_distribution: IndexMap<String, u64>,
    pub cluster_distribution: IndexMap<String, ClusterDistribution>,
    pub rating_distribution: IndexMap<String, u64>,
    pub model_info: ModelInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterDistribution {
    pub review_count: usize,
    pub product_count: usize,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub classification: String,
    pub clustering: String,
    pub summarization: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterEntry {
    pub review_count: usize,
    pub product_count: usize,
    pub avg_rating: Option<f64>,
    pub sentiment: IndexMap<String, u64>,
    pub top_products: Vec<TopProductEntry>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProductEntry {
    pub name: String,
    pub reviews: usize,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEntry {
    pub name: String,
    pub cluster: String,
    pub review_count: usize,
    pub avg_rating: Option<f64>,
    pub sentiment: IndexMap<String, u64>,
    pub summary: String,
}

#[must_use]
pub fn build_stats(dataset: &Dataset) -> Stats {
    let reviews = &dataset.reviews;

    let cluster_distribution: IndexMap<String, ClusterDistribution> = group_by_cluster(dataset)
        .into_iter()
        .map(|(name, group)| {
            let entry = ClusterDistribution {
                review_count: group.len(),
                product_count: distinct_names(&group),
                avg_rating: average_rating(&group),
            };
            (name.to_string(), entry)
        })
        .collect();

    let all: Vec<&Review> = reviews.iter().collect();

    Stats {
        total_reviews: reviews.len(),
        total_products: distinct_names(&all),
        total_clusters: cluster_distribution.len(),
        avg_rating: average_rating(&all),
        sentiment_distribution: sentiment_counts(&all),
        cluster_distribution,
        rating_distribution: rating_distribution(reviews),
        model_info: ModelInfo {
            classification: CLASSIFICATION_MODEL.to_string(),
            clustering: CLUSTERING_MODEL.to_string(),
            summarization: dataset
                .summaries
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            provider: dataset
                .summaries
                .provider
                .clone()
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
        },
    }
}

/// Per-cluster details keyed by cluster name. Empty when the dataset has no
/// cluster column.
#[must_use]
pub fn build_clusters(dataset: &Dataset) -> IndexMap<String, ClusterEntry> {
    group_by_cluster(dataset)
        .into_iter()
        .map(|(name, group)| {
            let summary = dataset
                .summaries
                .cluster_summaries
                .get(name)
                .cloned()
                .unwrap_or_else(|| MISSING_SUMMARY.to_string());
            let entry = ClusterEntry {
                review_count: group.len(),
                product_count: distinct_names(&group),
                avg_rating: average_rating(&group),
                sentiment: sentiment_counts(&group),
                top_products: top_products(&group),
                summary,
            };
            (name.to_string(), entry)
        })
        .collect()
}

/// One entry per product name, most-reviewed first. Ties keep the order in
/// which products first appear.
#[must_use]
pub fn build_products(dataset: &Dataset) -> Vec<ProductEntry> {
    let mut by_name: IndexMap<&str, Vec<&Review>> = IndexMap::new();
    for review in &dataset.reviews {
        if let Some(name) = review.name.as_deref() {
            by_name.entry(name).or_default().push(review);
        }
    }

    let mut products: Vec<ProductEntry> = by_name
        .into_iter()
        .map(|(name, group)| {
            let cluster = if dataset.has_clusters {
                group[0].cluster.as_deref().unwrap_or(UNKNOWN_CLUSTER)
            } else {
                UNKNOWN_CLUSTER
            };
            ProductEntry {
                name: name.to_string(),
                cluster: cluster.to_string(),
                review_count: group.len(),
                avg_rating: average_rating(&group),
                sentiment: sentiment_counts(&group),
                summary: dataset.summaries.product_summary_text(name).to_string(),
            }
        })
        .collect();

    products.sort_by(|a, b| b.review_count.cmp(&a.review_count));
    products
}

/// Reviews grouped by cluster name in name order. Reviews without a cluster
/// are left out.
pub(crate) fn group_by_cluster(dataset: &Dataset) -> BTreeMap<&str, Vec<&Review>> {
    let mut groups: BTreeMap<&str, Vec<&Review>> = BTreeMap::new();
    if !dataset.has_clusters {
        return groups;
    }
    for review in &dataset.reviews {
        if let Some(cluster) = review.cluster.as_deref() {
            groups.entry(cluster).or_default().push(review);
        }
    }
    groups
}

fn top_products(group: &[&Review]) -> Vec<TopProductEntry> {
    let mut by_name: BTreeMap<&str, Vec<&Review>> = BTreeMap::new();
    for review in group {
        if let Some(name) = review.name.as_deref() {
            by_name.entry(name).or_default().push(review);
        }
    }

    let mut entries: Vec<TopProductEntry> = by_name
        .into_iter()
        .map(|(name, reviews)| TopProductEntry {
            name: name.to_string(),
            reviews: reviews.iter().filter(|r| r.text.is_some()).count(),
            avg_rating: average_rating(&reviews),
        })
        .collect();

    entries.sort_by(|a, b| b.reviews.cmp(&a.reviews));
    entries.truncate(TOP_PRODUCTS_PER_CLUSTER);
    entries
}

fn distinct_names(group: &[&Review]) -> usize {
    group
        .iter()
        .filter_map(|r| r.name.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Mean of the present ratings, rounded to two decimals.
fn average_rating(group: &[&Review]) -> Option<f64> {
    let ratings: Vec<f64> = group.iter().filter_map(|r| r.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    Some(round_to(mean, 2))
}

/// Upper-cased label counts, largest first. Labels differing only in case
/// share a bucket.
pub(crate) fn sentiment_counts(group: &[&Review]) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for label in group.iter().filter_map(|r| r.sentiment.as_deref()) {
        *counts.entry(label.to_uppercase()).or_default() += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Review counts keyed by the integer part of the rating, ascending.
fn rating_distribution(reviews: &[Review]) -> IndexMap<String, u64> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for rating in reviews.iter().filter_map(|r| r.rating) {
        #[allow(clippy::cast_possible_truncation)]
        let bucket = rating.trunc() as i64;
        *buckets.entry(bucket).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(rating, count)| (rating.to_string(), count))
        .collect()
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
