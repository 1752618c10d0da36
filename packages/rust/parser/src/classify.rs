//! Page classification.
//!
//! Each page gets exactly one [`PageRole`]. Roles are decided by an ordered
//! table of [`Rule`]s; the first rule that matches wins, so precedence is the
//! table order and nothing else.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use workbook_shared::{Result, StaticSection, WorkbookError};

use crate::pages::content_lines;

/// Phrase that marks a table-of-contents page.
pub const TABLE_OF_CONTENTS: &str = "Table of Contents";

/// `WEEK n:` at the start of the first line.
static WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^WEEK (\d+):").expect("week regex"));

/// `Day n:` anywhere in the page.
static DAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Day (\d+):").expect("day regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A page and its first non-empty line.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub text: &'a str,
    pub first_line: &'a str,
}

impl<'a> Page<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            first_line: content_lines(text).next().unwrap_or(""),
        }
    }
}

/// Number captured from a `Day n:` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayNumber {
    Number(u32),
    /// Digits too large for `u32`.
    Overflow(String),
}

impl DayNumber {
    fn from_digits(digits: &str) -> Self {
        digits
            .parse()
            .map_or_else(|_| Self::Overflow(digits.to_string()), Self::Number)
    }

    /// The number, or a parse error naming the digits that overflowed.
    pub fn value(&self) -> Result<u32> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Overflow(digits) => Err(WorkbookError::parse(format!(
                "day number {digits} is too large"
            ))),
        }
    }
}

/// What a page contributes to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRole {
    /// Table of contents; ignored.
    TableOfContents,
    /// One of the static sections, stored verbatim.
    Section(StaticSection),
    /// A week introduction, possibly sharing the page with a day.
    WeekIntro { week: u32, day: Option<DayNumber> },
    /// A day page without a week heading.
    Day { day: DayNumber },
    /// Nothing recognizable; dropped.
    Unrecognized,
}

/// One entry in the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable name for logs and tests.
    pub name: &'static str,
    /// Returns the page's role if this rule applies.
    pub matches: fn(&Page<'_>) -> Option<PageRole>,
}

/// Classification rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "table-of-contents",
        matches: table_of_contents,
    },
    Rule {
        name: "static-section",
        matches: static_section,
    },
    Rule {
        name: "week-intro",
        matches: week_intro,
    },
    Rule {
        name: "day",
        matches: isolated_day,
    },
];

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify a page. Pages no rule claims are [`PageRole::Unrecognized`].
pub fn classify(page: &Page<'_>) -> PageRole {
    for rule in RULES {
        if let Some(role) = (rule.matches)(page) {
            trace!(rule = rule.name, ?role, "page classified");
            return role;
        }
    }
    PageRole::Unrecognized
}

/// Number from the first `Day n:` anywhere in `text`. Later headings are
/// never consulted, even when the first one overflows.
pub fn find_day_number(text: &str) -> Option<DayNumber> {
    DAY_RE
        .captures(text)
        .map(|caps| DayNumber::from_digits(&caps[1]))
}

fn table_of_contents(page: &Page<'_>) -> Option<PageRole> {
    page.text
        .contains(TABLE_OF_CONTENTS)
        .then_some(PageRole::TableOfContents)
}

fn static_section(page: &Page<'_>) -> Option<PageRole> {
    StaticSection::ALL
        .into_iter()
        .find(|section| page.first_line.contains(section.marker()))
        .map(PageRole::Section)
}

fn week_intro(page: &Page<'_>) -> Option<PageRole> {
    // A number too large for u32 is not a week heading.
    let week = WEEK_RE.captures(page.first_line)?[1].parse().ok()?;
    Some(PageRole::WeekIntro {
        week,
        day: find_day_number(page.text),
    })
}

fn isolated_day(page: &Page<'_>) -> Option<PageRole> {
    find_day_number(page.text).map(|day| PageRole::Day { day })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
