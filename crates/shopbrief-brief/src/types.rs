use serde::{Deserialize, Serialize};

/// A category brief after extraction.
///
/// Numeric fields are `None` when the source text did not carry them;
/// zero is a legitimate rating or count and is never used as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBrief {
    pub category: String,
    /// Entries in source order. The brief format promises three, but every
    /// numbered entry is kept.
    pub top_products: Vec<TopProduct>,
    pub worst_product: WorstProduct,
}

impl Default for ParsedBrief {
    fn default() -> Self {
        Self {
            category: crate::parse::DEFAULT_CATEGORY.to_string(),
            top_products: Vec::new(),
            worst_product: WorstProduct::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub complaints: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorstProduct {
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub reason: String,
}

impl WorstProduct {
    /// `true` when nothing at all was extracted for the worst product.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.rating.is_none()
            && self.review_count.is_none()
            && self.reason.is_empty()
    }
}
