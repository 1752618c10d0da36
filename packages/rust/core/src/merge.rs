//! Cross-edition merge of example passages.
//!
//! The secondary edition only contributes its `example` passages. Each one
//! is spliced into the primary day of the same number, ahead of the
//! reflection questions when the day has them, and skipped when its opening
//! is already present so a second run changes nothing.

use tracing::{debug, info, instrument};

use workbook_parser::REFLECTION_MARKER;
use workbook_shared::Document;

/// Characters of an example checked for prior presence.
pub const IDEMPOTENCY_PREFIX_CHARS: usize = 20;

/// Where an example ended up, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Inserted right before `Reflection Questions:`.
    InsertedBeforeReflection,
    /// Appended to the end of the text.
    Appended,
    /// The text already contained the example's opening.
    AlreadyPresent,
}

/// Counts from one merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub inserted: usize,
    pub appended: usize,
    pub already_present: usize,
    /// Primary days with no secondary week or day of the same number.
    pub missing_counterpart: usize,
    /// Secondary counterparts whose example was empty.
    pub without_example: usize,
}

impl MergeReport {
    /// Examples that changed the primary text.
    pub fn merged(&self) -> usize {
        self.inserted + self.appended
    }

    fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::InsertedBeforeReflection => self.inserted += 1,
            MergeOutcome::Appended => self.appended += 1,
            MergeOutcome::AlreadyPresent => self.already_present += 1,
        }
    }
}

/// Merge every secondary example into the matching primary day, in place.
#[instrument(skip_all)]
pub fn merge_examples(primary: &mut Document, secondary: &Document) -> MergeReport {
    let mut report = MergeReport::default();

    for week in &mut primary.weeks {
        let Some(other_week) = secondary.week(week.number) else {
            debug!(week = week.number, "no secondary week, skipping");
            report.missing_counterpart += week.days.len();
            continue;
        };

        for day in &mut week.days {
            let Some(other) = other_week.day(day.day) else {
                report.missing_counterpart += 1;
                continue;
            };
            if other.example.is_empty() {
                report.without_example += 1;
                continue;
            }

            let outcome = splice_example(&mut day.full_text, &other.example);
            debug!(day = day.day, ?outcome, "example merged");
            report.record(outcome);
        }
    }

    info!(
        inserted = report.inserted,
        appended = report.appended,
        already_present = report.already_present,
        missing = report.missing_counterpart,
        "merge complete"
    );
    report
}

/// Splice `example` into `full_text`.
///
/// With a reflection marker the result is
/// `trim(before) + "\n\n" + example + "\n\n" + marker...`; otherwise the
/// example is appended after a blank line.
pub fn splice_example(full_text: &mut String, example: &str) -> MergeOutcome {
    if full_text.contains(idempotency_prefix(example)) {
        return MergeOutcome::AlreadyPresent;
    }

    match full_text.find(REFLECTION_MARKER) {
        Some(idx) => {
            let (before, after) = full_text.split_at(idx);
            *full_text = format!("{}\n\n{example}\n\n{after}", before.trim());
            MergeOutcome::InsertedBeforeReflection
        }
        None => {
            full_text.push_str("\n\n");
            full_text.push_str(example);
            MergeOutcome::Appended
        }
    }
}

/// First [`IDEMPOTENCY_PREFIX_CHARS`] characters of `example`.
fn idempotency_prefix(example: &str) -> &str {
    let end = example
        .char_indices()
        .nth(IDEMPOTENCY_PREFIX_CHARS)
        .map_or(example.len(), |(idx, _)| idx);
    &example[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use workbook_shared::{Day, Week};

    fn day(number: u32, full_text: &str, example: &str) -> Day {
        Day {
            day: number,
            title: format!("Day {number}"),
            subtitle: String::new(),
            full_text: full_text.into(),
            example: example.into(),
        }
    }

    fn document(weeks: Vec<(u32, Vec<Day>)>) -> Document {
        Document {
            weeks: weeks
                .into_iter()
                .map(|(number, days)| Week {
                    days,
                    ..Week::placeholder(number)
                })
                .collect(),
            ..Document::default()
        }
    }

    #[test]
    fn inserts_before_reflection_questions() {
        let mut text = "A\n\nReflection Questions:\nB".to_string();
        let outcome = splice_example(&mut text, "E");
        assert_eq!(outcome, MergeOutcome::InsertedBeforeReflection);
        assert_eq!(text, "A\n\nE\n\nReflection Questions:\nB");
    }

    #[test]
    fn appends_without_marker() {
        let mut text = "A".to_string();
        assert_eq!(splice_example(&mut text, "E"), MergeOutcome::Appended);
        assert_eq!(text, "A\n\nE");
    }

    #[test]
    fn splits_at_first_marker() {
        let mut text = "A\nReflection Questions: one\nReflection Questions: two".to_string();
        splice_example(&mut text, "Movie Example: film");
        assert_eq!(
            text,
            "A\n\nMovie Example: film\n\nReflection Questions: one\nReflection Questions: two"
        );
    }

    #[test]
    fn second_splice_is_noop() {
        let mut text = "A\n\nReflection Questions:\nB".to_string();
        let example = "Movie Example: a long passage about a film";
        splice_example(&mut text, example);
        let once = text.clone();

        assert_eq!(splice_example(&mut text, example), MergeOutcome::AlreadyPresent);
        assert_eq!(text, once);
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        let example = "Movie Example: “Amélie” – a quiet film";
        assert_eq!(idempotency_prefix(example).chars().count(), IDEMPOTENCY_PREFIX_CHARS);
        assert_eq!(idempotency_prefix("short"), "short");
    }

    #[test]
    fn merge_is_idempotent() {
        let secondary = document(vec![(
            1,
            vec![
                day(1, "", "Movie Example: Groundhog Day"),
                day(2, "", "Netflix Example: a series"),
            ],
        )]);
        let mut primary = document(vec![(
            1,
            vec![
                day(1, "Body\n\nReflection Questions:\nWhy?", ""),
                day(2, "Body two", ""),
            ],
        )]);

        let first = merge_examples(&mut primary, &secondary);
        assert_eq!(first.inserted, 1);
        assert_eq!(first.appended, 1);
        let once = primary.clone();

        let second = merge_examples(&mut primary, &secondary);
        assert_eq!(second.merged(), 0);
        assert_eq!(second.already_present, 2);
        assert_eq!(primary, once);
    }

    #[test]
    fn missing_counterparts_are_skipped() {
        let secondary = document(vec![(1, vec![day(1, "", "")])]);
        let mut primary = document(vec![
            (1, vec![day(1, "one", ""), day(2, "two", "")]),
            (2, vec![day(8, "eight", ""), day(9, "nine", "")]),
        ]);
        let before = primary.clone();

        let report = merge_examples(&mut primary, &secondary);
        assert_eq!(primary, before);
        assert_eq!(report.without_example, 1);
        assert_eq!(report.missing_counterpart, 3);
        assert_eq!(report.merged(), 0);
    }

    #[test]
    fn secondary_is_untouched() {
        let secondary = document(vec![(1, vec![day(3, "orig", "Real-World Example: x")])]);
        let snapshot = secondary.clone();
        let mut primary = document(vec![(1, vec![day(3, "text", "")])]);

        merge_examples(&mut primary, &secondary);
        assert_eq!(secondary, snapshot);
        assert_eq!(primary.weeks[0].days[0].full_text, "text\n\nReal-World Example: x");
    }
}
