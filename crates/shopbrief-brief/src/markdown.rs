//! Prompt and markdown assembly for category summaries.

use crate::reason::prettify_reason;
use crate::types::{ParsedBrief, TopProduct};

/// Placeholder for numbers the brief did not carry.
const MISSING: &str = "n/a";

/// Formats a rating with at least one decimal place (`4` → `4.0`).
fn rating_text(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{r:.1}"),
        Some(r) => r.to_string(),
        None => MISSING.to_string(),
    }
}

fn count_text(count: Option<u64>) -> String {
    count.map_or_else(|| MISSING.to_string(), |c| c.to_string())
}

/// One-sentence summary of a top product, used for product summaries.
#[must_use]
pub fn product_fact(product: &TopProduct) -> String {
    format!(
        "{} has rating {} from {} reviews.",
        product.name,
        rating_text(product.rating),
        count_text(product.review_count)
    )
}

/// The fact lines handed to the language model, one per line.
#[must_use]
pub fn facts(brief: &ParsedBrief) -> String {
    let mut lines = vec![format!("Category: {}.", brief.category)];
    lines.extend(brief.top_products.iter().map(product_fact));

    let worst = &brief.worst_product;
    if !worst.name.is_empty() {
        lines.push(format!(
            "The lowest rated is {} with rating {} from {} reviews.",
            worst.name,
            rating_text(worst.rating),
            count_text(worst.review_count)
        ));
    }

    lines.join("\n")
}

/// Builds the shopper-summary prompt around the given fact block.
#[must_use]
pub fn generation_prompt(facts: &str) -> String {
    format!(
        "Write 2 short natural paragraphs for shoppers.\n\nUse ONLY the facts below.\n\nFACTS:\n{facts}\n"
    )
}

/// Assembles the category page: heading, generated summary, top picks, and
/// the lowest-rated product with its normalized complaint signal.
#[must_use]
pub fn assemble_markdown(brief: &ParsedBrief, summary: &str) -> String {
    let mut blocks = vec![
        format!("# {}", brief.category),
        String::new(),
        summary.to_string(),
        String::new(),
        "## Top Picks".to_string(),
    ];

    for product in &brief.top_products {
        blocks.push(format!(
            "**{}**  \nRating: {} • Reviews: {}  \nComplaints: {}",
            product.name,
            rating_text(product.rating),
            count_text(product.review_count),
            product.complaints
        ));
    }

    blocks.push("\n## Avoid / Lowest Rated".to_string());

    let worst = &brief.worst_product;
    if !worst.name.is_empty() {
        blocks.push(format!(
            "⚠️ **{}**  \nRating: {} • Reviews: {}  \nComplaint signal: {}",
            worst.name,
            rating_text(worst.rating),
            count_text(worst.review_count),
            prettify_reason(&worst.reason)
        ));
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_brief;

    const BRIEF: &str = "CATEGORY: Tablets\nTOP 3 PRODUCTS:\n1) Widget A | rating = 4.5, reviews = 120\nComplaints: battery; screen\n2) Widget B | rating = 4\nWORST PRODUCT: Widget Z | rating = 2.1, reviews = 30\navoid because: cheap plastic; breaks";

    #[test]
    fn facts_lists_category_products_and_worst() {
        let parsed = parse_brief(BRIEF);
        assert_eq!(
            facts(&parsed),
            "Category: Tablets.\n\
             Widget A has rating 4.5 from 120 reviews.\n\
             Widget B has rating 4.0 from n/a reviews.\n\
             The lowest rated is Widget Z with rating 2.1 from 30 reviews."
        );
    }

    #[test]
    fn facts_omits_worst_line_without_name() {
        let parsed = parse_brief("CATEGORY: Media\navoid because: remote");
        assert_eq!(facts(&parsed), "Category: Media.");
    }

    #[test]
    fn prompt_wraps_facts() {
        let prompt = generation_prompt("Category: Tablets.");
        assert!(prompt.starts_with("Write 2 short natural paragraphs for shoppers."));
        assert!(prompt.contains("Use ONLY the facts below."));
        assert!(prompt.ends_with("FACTS:\nCategory: Tablets.\n"));
    }

    #[test]
    fn markdown_has_sections_in_order() {
        let parsed = parse_brief(BRIEF);
        let md = assemble_markdown(&parsed, "Great tablets for reading.");

        let heading = md.find("# Tablets").unwrap();
        let summary = md.find("Great tablets for reading.").unwrap();
        let picks = md.find("## Top Picks").unwrap();
        let avoid = md.find("## Avoid / Lowest Rated").unwrap();
        assert!(heading < summary && summary < picks && picks < avoid);

        assert!(md.contains("**Widget A**  \nRating: 4.5 • Reviews: 120  \nComplaints: battery; screen"));
        assert!(md.contains("**Widget B**  \nRating: 4.0 • Reviews: n/a  \nComplaints: "));
        assert!(md.contains(
            "⚠️ **Widget Z**  \nRating: 2.1 • Reviews: 30  \nComplaint signal: Negative reviews repeatedly mention: cheap plastic, breaks."
        ));
    }

    #[test]
    fn markdown_without_worst_product_ends_with_avoid_heading() {
        let parsed = parse_brief("CATEGORY: Accessories");
        let md = assemble_markdown(&parsed, "Summary.");
        assert_eq!(
            md,
            "# Accessories\n\n\n\nSummary.\n\n\n\n## Top Picks\n\n\n## Avoid / Lowest Rated"
        );
    }

    #[test]
    fn product_fact_formats_numbers() {
        let product = TopProduct {
            name: "Fire HD 8".to_string(),
            rating: Some(3.0),
            review_count: Some(7),
            complaints: String::new(),
        };
        assert_eq!(product_fact(&product), "Fire HD 8 has rating 3.0 from 7 reviews.");
    }
}
