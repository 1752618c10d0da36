//! Day page extraction: title, cleaned body, and example passage.
//!
//! Nothing here fails. Missing headings fall back to `Day n` and a missing
//! example is an empty string.

use std::sync::LazyLock;

use regex::Regex;

use workbook_shared::Day;

use crate::pages::content_lines;

/// Marker opening the reflection block at the end of a day.
pub const REFLECTION_MARKER: &str = "Reflection Questions:";

/// Marker opening the notes block, used when reflections are absent.
pub const NOTES_MARKER: &str = "Notes Space:";

/// Labels that open an example passage.
pub const EXAMPLE_LABELS: [&str; 3] = ["Real-World Example:", "Netflix Example:", "Movie Example:"];

/// `Day n: Title` on a single line. The number is compared by value, so
/// `Day 12` never stands in for `Day 1`.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Day (\d+):?\s*(.*)$").expect("title regex"));

/// A `WEEK n:` heading line.
static WEEK_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^WEEK \d+:").expect("week heading regex"));

/// Earliest example label anywhere in the page.
static EXAMPLE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = EXAMPLE_LABELS
        .iter()
        .map(|label| regex::escape(label))
        .collect();
    Regex::new(&alternatives.join("|")).expect("example regex")
});

/// Build a [`Day`] from a page already known to describe day `number`.
pub fn parse_day(page: &str, number: u32) -> Day {
    let lines: Vec<&str> = content_lines(page).collect();

    let heading = lines
        .iter()
        .enumerate()
        .find_map(|(idx, line)| title_on_line(line, number).map(|title| (idx, title)));

    let (title, body) = match heading {
        Some((idx, title)) => (title, &lines[idx + 1..]),
        None => (default_title(number), &lines[..]),
    };

    let full_text = body
        .iter()
        .copied()
        .filter(|line| !is_week_heading(line) && !is_separator(line))
        .collect::<Vec<_>>()
        .join("\n\n");

    Day {
        day: number,
        title,
        subtitle: String::new(),
        full_text,
        example: extract_example(page).unwrap_or_default(),
    }
}

/// Example passage in `page`: from the first example label up to the
/// nearest following reflection or notes marker, trimmed.
///
/// Returns `None` when there is no label, or no closing marker after it.
pub fn extract_example(page: &str) -> Option<String> {
    let start = EXAMPLE_LABEL_RE.find(page)?.start();
    let rest = &page[start..];

    let end = [REFLECTION_MARKER, NOTES_MARKER]
        .iter()
        .filter_map(|marker| rest.find(marker))
        .min()?;

    Some(rest[..end].trim().to_string())
}

fn title_on_line(line: &str, number: u32) -> Option<String> {
    let caps = TITLE_RE.captures(line)?;
    if caps[1].parse::<u32>().ok()? != number {
        return None;
    }
    let title = caps[2].trim();
    Some(if title.is_empty() {
        default_title(number)
    } else {
        title.to_string()
    })
}

fn default_title(number: u32) -> String {
    format!("Day {number}")
}

fn is_week_heading(line: &str) -> bool {
    WEEK_HEADING_RE.is_match(line)
}

/// A line made only of underscores (blank fill-in rules).
fn is_separator(line: &str) -> bool {
    line.contains('_') && line.chars().all(|c| c == '_' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_body_after_heading() {
        let page = "Day 2: Next Steps\nFirst paragraph.\n\nSecond paragraph.";
        let day = parse_day(page, 2);
        assert_eq!(day.day, 2);
        assert_eq!(day.title, "Next Steps");
        assert_eq!(day.subtitle, "");
        assert_eq!(day.full_text, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(day.example, "");
    }

    #[test]
    fn heading_is_case_insensitive_and_colon_optional() {
        assert_eq!(parse_day("DAY 3 Letting Go\nbody", 3).title, "Letting Go");
        assert_eq!(parse_day("day 3: lower\nbody", 3).title, "lower");
    }

    #[test]
    fn empty_heading_falls_back() {
        let day = parse_day("Day 4:\nbody", 4);
        assert_eq!(day.title, "Day 4");
        assert_eq!(day.full_text, "body");
    }

    #[test]
    fn missing_heading_keeps_every_line() {
        let day = parse_day("Intro line\nbody", 5);
        assert_eq!(day.title, "Day 5");
        assert_eq!(day.full_text, "Intro line\n\nbody");
    }

    #[test]
    fn other_day_numbers_are_not_headings() {
        let day = parse_day("Day 12: Wrong\nDay 1: Right\nbody", 1);
        assert_eq!(day.title, "Right");
        assert_eq!(day.full_text, "body");
    }

    #[test]
    fn shared_week_page_drops_intro_material() {
        let page = "WEEK 1: EMBRACING REALITY\nThis week we begin.\nDay 1: It's Worse Than You Think\nThe first step.";
        let day = parse_day(page, 1);
        assert_eq!(day.title, "It's Worse Than You Think");
        assert_eq!(day.full_text, "The first step.");
    }

    #[test]
    fn filters_week_headings_and_separators() {
        let page = "Day 9: Title\nbody\nWEEK 2: stray heading\n__________\n_____ _____\nFill in: ____ here\nend";
        let day = parse_day(page, 9);
        assert_eq!(day.full_text, "body\n\nFill in: ____ here\n\nend");
    }

    #[test]
    fn example_ends_at_reflection_questions() {
        let page = "Day 2: Next\nbody2\nReal-World Example: foo\nmore foo\nReflection Questions: q";
        let day = parse_day(page, 2);
        assert_eq!(day.example, "Real-World Example: foo\nmore foo");
        assert!(day.full_text.contains("Reflection Questions: q"));
    }

    #[test]
    fn example_ends_at_nearest_marker() {
        let page = "Movie Example: film\nNotes Space:\n____\nReflection Questions: later";
        assert_eq!(extract_example(page).as_deref(), Some("Movie Example: film"));
    }

    #[test]
    fn earliest_label_wins() {
        let page = "Netflix Example: show\nReal-World Example: life\nReflection Questions:";
        assert_eq!(
            extract_example(page).as_deref(),
            Some("Netflix Example: show\nReal-World Example: life")
        );
    }

    #[test]
    fn example_without_closing_marker_is_empty() {
        assert_eq!(extract_example("Real-World Example: runs on forever"), None);
        assert_eq!(parse_day("Day 6: T\nReal-World Example: x", 6).example, "");
    }

    #[test]
    fn marker_before_label_does_not_close_example() {
        let page = "Reflection Questions: early\nReal-World Example: late\nNotes Space:";
        assert_eq!(extract_example(page).as_deref(), Some("Real-World Example: late"));
    }

    #[test]
    fn no_label_no_example() {
        assert_eq!(extract_example("Reflection Questions: only"), None);
        assert_eq!(extract_example("Real-World Example\nReflection Questions:"), None);
    }

    #[test]
    fn every_label_opens_an_example() {
        for label in EXAMPLE_LABELS {
            let page = format!("intro\n{label} passage\nNotes Space:");
            assert_eq!(extract_example(&page), Some(format!("{label} passage")));
        }
    }
}
