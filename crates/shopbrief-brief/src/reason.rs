//! Turns raw complaint keywords into a sentence for shoppers.

/// Returned when the reason is empty or whitespace.
pub const NO_REASON: &str = "No clear reason provided.";

/// Returned when every keyword is filtered out.
pub const GENERAL_REASON: &str =
    "Negative feedback appears general without a clear recurring issue.";

/// Keyword fragments that carry no meaning on their own. Most are the
/// leftovers of tokenized contractions ("don't" → "don").
const STOP_WORDS: &[&str] = &[
    "don", "didn", "doesn", "dont", "isn", "wasn", "weren", "cant", "couldn", "wouldn", "buy",
];

const MIN_KEYWORD_CHARS: usize = 3;
const MAX_KEYWORDS: usize = 6;

/// Reason text with more words than this and no semicolon is already prose.
const PROSE_MIN_WORDS: usize = 5;

/// Normalizes a semicolon-separated keyword list (or free text) into one
/// sentence.
///
/// Keywords are trimmed, lowercased, filtered by length and stop-list,
/// deduplicated in first-seen order, and capped at six.
#[must_use]
pub fn prettify_reason(reason: &str) -> String {
    let reason = reason.trim();
    if reason.is_empty() {
        return NO_REASON.to_string();
    }

    if !reason.contains(';') && reason.split_whitespace().count() > PROSE_MIN_WORDS {
        return reason.to_string();
    }

    let mut keywords: Vec<String> = Vec::new();
    for token in reason.split(';') {
        let token = token.trim().to_lowercase();
        if token.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        if !keywords.contains(&token) {
            keywords.push(token);
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    if keywords.is_empty() {
        return GENERAL_REASON.to_string();
    }

    format!(
        "Negative reviews repeatedly mention: {}.",
        keywords.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reason_returns_fallback() {
        assert_eq!(prettify_reason(""), NO_REASON);
        assert_eq!(prettify_reason("   \n\t"), NO_REASON);
    }

    #[test]
    fn duplicates_removed_in_first_seen_order() {
        assert_eq!(
            prettify_reason("cheap plastic; breaks; breaks; flimsy"),
            "Negative reviews repeatedly mention: cheap plastic, breaks, flimsy."
        );
    }

    #[test]
    fn two_letter_tokens_are_dropped() {
        // "ok" is below the three-character minimum.
        assert_eq!(
            prettify_reason("cheap plastic; breaks; breaks; ok"),
            "Negative reviews repeatedly mention: cheap plastic, breaks."
        );
    }

    #[test]
    fn all_tokens_filtered_returns_general_fallback() {
        assert_eq!(prettify_reason("a; to; it"), GENERAL_REASON);
        assert_eq!(prettify_reason("don; buy; CANT"), GENERAL_REASON);
    }

    #[test]
    fn long_prose_without_semicolons_is_unchanged() {
        let prose = "The hinge snapped after two weeks of normal use";
        assert_eq!(prettify_reason(prose), prose);
    }

    #[test]
    fn short_text_without_semicolons_is_a_single_keyword() {
        assert_eq!(
            prettify_reason("Battery Drain"),
            "Negative reviews repeatedly mention: battery drain."
        );
    }

    #[test]
    fn five_words_is_not_prose() {
        assert_eq!(
            prettify_reason("screen cracks very easily indeed"),
            "Negative reviews repeatedly mention: screen cracks very easily indeed."
        );
    }

    #[test]
    fn keywords_are_lowercased_before_dedup() {
        assert_eq!(
            prettify_reason("Battery; BATTERY; battery "),
            "Negative reviews repeatedly mention: battery."
        );
    }

    #[test]
    fn at_most_six_keywords() {
        assert_eq!(
            prettify_reason("one1; two2; three; four; five; six6; seven; eight"),
            "Negative reviews repeatedly mention: one1, two2, three, four, five, six6."
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(
            prettify_reason(";;charger;;"),
            "Negative reviews repeatedly mention: charger."
        );
    }
}
