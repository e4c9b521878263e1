//! Writes a [`ParsedBrief`] back out in the brief text format.

use std::fmt::Write as _;

use crate::types::ParsedBrief;

/// Renders a brief that [`crate::parse_brief`] reads back into the same record.
///
/// Holds for records whose names and text fields are single-line, contain no
/// `|`, and whose category is non-empty. Absent numbers and empty text fields
/// are omitted rather than written as placeholders.
#[must_use]
pub fn render_brief(brief: &ParsedBrief) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CATEGORY: {}", brief.category);

    if !brief.top_products.is_empty() {
        out.push_str("TOP 3 PRODUCTS:\n");
        for (idx, product) in brief.top_products.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}) {}",
                idx + 1,
                header(&product.name, product.rating, product.review_count)
            );
            if !product.complaints.is_empty() {
                let _ = writeln!(out, "Complaints: {}", product.complaints);
            }
        }
    }

    let worst = &brief.worst_product;
    // A bare marker would make the parser pick up the following line as the name.
    if !worst.name.is_empty() || worst.rating.is_some() || worst.review_count.is_some() {
        let _ = writeln!(
            out,
            "WORST PRODUCT: {}",
            header(&worst.name, worst.rating, worst.review_count)
        );
    }
    if !worst.reason.is_empty() {
        let _ = writeln!(out, "avoid because: {}", worst.reason);
    }

    out
}

fn header(name: &str, rating: Option<f64>, review_count: Option<u64>) -> String {
    let mut fields = Vec::with_capacity(2);
    if let Some(rating) = rating {
        fields.push(format!("rating = {rating}"));
    }
    if let Some(count) = review_count {
        fields.push(format!("reviews = {count}"));
    }

    if fields.is_empty() {
        name.to_string()
    } else {
        format!("{name} | {}", fields.join(", "))
    }
}
