//! Lenient parsing of free-text generative output into recommendations.
//!
//! Generated text arrives in unpredictable shapes: paragraphs, bullet lists,
//! numbered lists, "Recommendation 3:" labels, or one long line. This module
//! turns any of them into a short list of clean recommendation strings.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of parsed recommendations kept.
pub const MAX_PARSED_RECOMMENDATIONS: usize = 6;

/// Segments shorter than this (in characters) are continuation fragments.
pub const MIN_RECOMMENDATION_CHARS: usize = 20;

/// Below this many paragraph/bullet segments, the text is re-split by line.
const MIN_PARAGRAPH_SEGMENTS: usize = 3;

/// Blank line, or a newline followed by a bullet marker.
static PARAGRAPH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n|\n\s*[-•*]\s*").expect("valid regex"));

static LEADING_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-•*]\s*").expect("valid regex"));

/// `1.`, `2)`, `3]` style numbering.
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)\]]\s*").expect("valid regex"));

/// `Step 1:`, `Recommendation 2.`, `Point 3)`, `Item 4:` style labels.
static LEADING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(step|recommendation|point|item)\s*\d+[:.)]\s*").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse raw generated text into at most [`MAX_PARSED_RECOMMENDATIONS`]
/// cleaned recommendations.
///
/// 1. Split on blank lines or bullet markers; with fewer than three
///    segments, re-split on single newlines instead.
/// 2. Strip bullets, numbering and labelled numbering from each segment.
/// 3. Join segments shorter than [`MIN_RECOMMENDATION_CHARS`] onto the
///    preceding segment.
/// 4. Keep the first six.
pub fn parse_recommendations(raw: &str) -> Vec<String> {
    let content = raw.trim();
    if content.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = PARAGRAPH_SPLIT_RE.split(content).collect();
    if segments.len() < MIN_PARAGRAPH_SEGMENTS {
        segments = content.lines().collect();
    }

    let cleaned = segments
        .into_iter()
        .map(clean_segment)
        .filter(|s| !s.is_empty());

    let mut merged = merge_fragments(cleaned);
    merged.truncate(MAX_PARSED_RECOMMENDATIONS);
    merged
}

/// Strip list decoration from a single segment and collapse inner newlines.
pub fn clean_segment(segment: &str) -> String {
    let text = segment.trim();
    let text = LEADING_BULLET_RE.replace(text, "");
    let text = LEADING_NUMBER_RE.replace(&text, "");
    let text = LEADING_LABEL_RE.replace(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append short fragments to the preceding recommendation.
///
/// A short fragment with nothing before it starts the list on its own.
fn merge_fragments(segments: impl Iterator<Item = String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for segment in segments {
        match merged.last_mut() {
            Some(previous) if segment.chars().count() < MIN_RECOMMENDATION_CHARS => {
                previous.push(' ');
                previous.push_str(&segment);
            }
            _ => merged.push(segment),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const REC_A: &str = "Reduce beef orders by 12% to cut 8.2 kg of weekly waste.";
    const REC_B: &str = "Freeze surplus portions within 2 hours to save 5.1 kg.";
    const REC_C: &str = "Donate 6.8 kg of unsold stock to a local food bank each week.";
    const REC_D: &str = "Log plate waste for 14 days to find the top 3 offending dishes.";

    #[test]
    fn paragraphs_separated_by_blank_lines() {
        let raw = format!("{REC_A}\n\n{REC_B}\n\n{REC_C}");
        assert_eq!(parse_recommendations(&raw), vec![REC_A, REC_B, REC_C]);
    }

    #[test]
    fn bullet_list_with_each_marker() {
        let raw = format!("- {REC_A}\n* {REC_B}\n• {REC_C}");
        assert_eq!(parse_recommendations(&raw), vec![REC_A, REC_B, REC_C]);
    }

    #[test]
    fn numbered_list_without_blank_lines_falls_back_to_lines() {
        let raw = format!("1. {REC_A}\n2) {REC_B}\n3] {REC_C}");
        assert_eq!(parse_recommendations(&raw), vec![REC_A, REC_B, REC_C]);
    }

    #[test]
    fn labelled_numbering_is_stripped() {
        let raw = format!(
            "Recommendation 1: {REC_A}\n\nStep 2. {REC_B}\n\nitem 3) {REC_C}\n\nPoint 4: {REC_D}"
        );
        assert_eq!(parse_recommendations(&raw), vec![REC_A, REC_B, REC_C, REC_D]);
    }

    #[test]
    fn single_line_response_yields_one_entry() {
        assert_eq!(parse_recommendations(REC_A), vec![REC_A]);
    }

    #[test]
    fn empty_and_whitespace_responses_yield_nothing() {
        assert!(parse_recommendations("").is_empty());
        assert!(parse_recommendations("   \n\n  \t ").is_empty());
    }

    #[test]
    fn two_paragraphs_resplit_by_line() {
        // Only two blank-line segments, so single newlines split further.
        let raw = format!("{REC_A}\n{REC_B}\n\n{REC_C}");
        assert_eq!(parse_recommendations(&raw), vec![REC_A, REC_B, REC_C]);
    }

    #[test]
    fn short_fragments_join_previous_entry() {
        let raw = format!("{REC_A}\n\n(per week)\n\n{REC_B}\n\n{REC_C}");
        let parsed = parse_recommendations(&raw);

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], format!("{REC_A} (per week)"));
        assert_eq!(parsed[1], REC_B);
    }

    #[test]
    fn leading_short_fragment_is_kept_as_its_own_entry() {
        let raw = format!("Tips:\n\n{REC_A}\n\n{REC_B}");
        let parsed = parse_recommendations(&raw);

        assert_eq!(parsed, vec!["Tips:", REC_A, REC_B]);
    }

    #[test]
    fn fewer_than_three_usable_fragments() {
        let raw = format!("{REC_A}\n\nok\n\nthanks");
        let parsed = parse_recommendations(&raw);

        assert_eq!(parsed, vec![format!("{REC_A} ok thanks")]);
    }

    #[test]
    fn output_is_capped_at_six() {
        let raw = (1..=9)
            .map(|i| format!("{i}. Recommendation number {i} with enough text to count."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let parsed = parse_recommendations(&raw);

        assert_eq!(parsed.len(), MAX_PARSED_RECOMMENDATIONS);
        assert_eq!(parsed[0], "Recommendation number 1 with enough text to count.");
        assert_eq!(parsed[5], "Recommendation number 6 with enough text to count.");
    }

    #[test]
    fn paragraph_with_wrapped_lines_is_collapsed() {
        let raw = format!("Rotate dairy stock daily\nso that 4.0 kg is used first.\n\n{REC_B}\n\n{REC_C}");
        let parsed = parse_recommendations(&raw);

        assert_eq!(parsed[0], "Rotate dairy stock daily so that 4.0 kg is used first.");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn numbers_inside_text_are_not_stripped() {
        assert_eq!(clean_segment("12 kg of bread can be frozen"), "12 kg of bread can be frozen");
        assert_eq!(clean_segment("  3. 12 kg of bread"), "12 kg of bread");
    }

    #[test]
    fn fragment_length_counts_characters_not_bytes() {
        // 19 characters but more than 20 bytes.
        let fragment = "ééééééééééééééééééé";
        assert_eq!(fragment.chars().count(), 19);

        let raw = format!("{REC_A}\n\n{fragment}\n\n{REC_B}");
        let parsed = parse_recommendations(&raw);
        assert_eq!(parsed[0], format!("{REC_A} {fragment}"));
    }
}
