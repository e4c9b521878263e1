//! Extraction of [`ParsedBrief`] records from category brief text.
//!
//! A brief is loosely structured:
//!
//! ```text
//! CATEGORY: Tablets
//! TOP 3 PRODUCTS:
//! 1) Widget A | rating = 4.5, reviews = 120
//! Complaints: battery; screen
//! WORST PRODUCT: Widget Z | rating = 2.1, reviews = 30
//! avoid because: cheap plastic; breaks
//! ```
//!
//! Each field is extracted independently and falls back to an empty value,
//! so [`parse_brief`] never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ParsedBrief, TopProduct, WorstProduct};

/// Category used when the brief has no `CATEGORY:` line.
pub const DEFAULT_CATEGORY: &str = "Category";

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*CATEGORY:[ \t]*(.+?)[ \t]*$").expect("valid category regex")
});

static TOP_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)TOP 3 PRODUCTS:\s*(.*?)(?:\n\s*WORST PRODUCT:|\z)")
        .expect("valid top products regex")
});

static ENTRY_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\)(?:\s|$)").expect("valid entry start regex"));

static ENTRY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\)\s*").expect("valid entry number regex"));

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rating\s*=\s*([0-9.]+)").expect("valid rating regex"));

static REVIEWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)reviews\s*=\s*([0-9]+)").expect("valid reviews regex"));

static WORST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WORST PRODUCT:\s*(.+)").expect("valid worst product regex"));

static AVOID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)avoid because:(.*)$").expect("valid avoid regex"));

/// Parses a brief into a structured record.
///
/// Missing sections yield defaults: category [`DEFAULT_CATEGORY`], no top
/// products, and an empty worst product. Numbers that do not parse are left
/// unset.
#[must_use]
pub fn parse_brief(brief: &str) -> ParsedBrief {
    let text = normalize_line_endings(brief);
    let text = text.trim();

    let category = CATEGORY_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|c| !c.is_empty())
        .map_or_else(|| DEFAULT_CATEGORY.to_string(), str::to_string);

    let top_products = TOP_BLOCK_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| parse_top_block(m.as_str().trim()))
        .unwrap_or_default();

    let mut worst_product = WORST_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| parse_worst_line(m.as_str()))
        .unwrap_or_default();

    if let Some(reason) = AVOID_RE.captures(text).and_then(|c| c.get(1)) {
        worst_product.reason = reason.as_str().trim().to_string();
    }

    ParsedBrief {
        category,
        top_products,
        worst_product,
    }
}

/// Converts CRLF and lone CR line endings to LF.
pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn parse_top_block(block: &str) -> Vec<TopProduct> {
    split_entries(block)
        .into_iter()
        .filter_map(|lines| parse_entry(&lines))
        .collect()
}

/// Groups block lines into entries, starting a new entry at every line that
/// begins with `<n>)`. Text before the first numbered line forms its own entry.
fn split_entries(block: &str) -> Vec<Vec<&str>> {
    let mut entries: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in block.split('\n') {
        if ENTRY_START_RE.is_match(line.trim_start()) && !current.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        entries.push(current);
    }

    entries
}

fn parse_entry(raw_lines: &[&str]) -> Option<TopProduct> {
    let lines: Vec<&str> = raw_lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let (first, details) = lines.split_first()?;

    let header = ENTRY_NUMBER_RE.replace(first, "");
    let header = header.trim();
    let (rating, review_count) = header_numbers(header);

    let complaints = details
        .iter()
        .find(|l| l.to_lowercase().starts_with("complaints:"))
        .and_then(|l| l.split_once(':'))
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default();

    Some(TopProduct {
        name: name_before_pipe(header),
        rating,
        review_count,
        complaints,
    })
}

fn parse_worst_line(captured: &str) -> WorstProduct {
    let line = captured.trim().split('\n').next().unwrap_or_default();
    let (rating, review_count) = header_numbers(line);

    WorstProduct {
        name: name_before_pipe(line),
        rating,
        review_count,
        reason: String::new(),
    }
}

fn name_before_pipe(header: &str) -> String {
    header
        .split('|')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Extracts `rating = <float>` and `reviews = <int>` from a header line.
fn header_numbers(header: &str) -> (Option<f64>, Option<u64>) {
    let rating = RATING_RE
        .captures(header)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok());
    let reviews = REVIEWS_RE
        .captures(header)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok());
    (rating, reviews)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
