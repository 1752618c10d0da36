//! Core domain types for the workbook content tree.
//!
//! These are the shapes emitted in the static content artifact, so field
//! names serialize in camelCase to match what the UI reads.

use serde::{Deserialize, Serialize};

/// Number of days grouped into one week.
pub const DAYS_PER_WEEK: u32 = 7;

/// Number of days in the workbook.
pub const TOTAL_DAYS: u32 = 28;

/// Number of weeks in the workbook.
pub const WEEK_COUNT: u32 = TOTAL_DAYS / DAYS_PER_WEEK;

/// Week a day belongs to: `ceil(day / 7)`.
///
/// Day 7 is in week 1, day 8 in week 2.
pub fn week_for_day(day: u32) -> u32 {
    day.div_ceil(DAYS_PER_WEEK)
}

// ---------------------------------------------------------------------------
// StaticSection
// ---------------------------------------------------------------------------

/// The non-daily sections of the workbook, recorded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticSection {
    Introduction,
    HowToUse,
    Conclusion,
    References,
    About,
}

impl StaticSection {
    /// Every section, in classification order.
    pub const ALL: [StaticSection; 5] = [
        StaticSection::Introduction,
        StaticSection::HowToUse,
        StaticSection::Conclusion,
        StaticSection::References,
        StaticSection::About,
    ];

    /// Heading text that identifies the section's first line.
    pub fn marker(self) -> &'static str {
        match self {
            StaticSection::Introduction => "Introduction: Welcome to Imperfection",
            StaticSection::HowToUse => "How to Use This Workbook",
            StaticSection::Conclusion => "Conclusion:",
            StaticSection::References => "References",
            StaticSection::About => "About This Workbook",
        }
    }
}

impl std::fmt::Display for StaticSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StaticSection::Introduction => "introduction",
            StaticSection::HowToUse => "howToUse",
            StaticSection::Conclusion => "conclusion",
            StaticSection::References => "references",
            StaticSection::About => "about",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Day / Week / Document
// ---------------------------------------------------------------------------

/// One day's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day number, 1..=28.
    pub day: u32,
    /// Heading text after `Day n:`, or `Day n` when absent.
    pub title: String,
    /// Always empty; kept for the UI's shape.
    #[serde(default)]
    pub subtitle: String,
    /// Body paragraphs separated by a blank line.
    pub full_text: String,
    /// Example passage, possibly empty.
    #[serde(default)]
    pub example: String,
}

/// One week and its days in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub number: u32,
    pub title: String,
    pub intro: String,
    pub days: Vec<Day>,
}

impl Week {
    /// A week nobody has described yet.
    pub fn placeholder(number: u32) -> Self {
        Self {
            number,
            title: format!("Week {number}"),
            intro: String::new(),
            days: Vec::new(),
        }
    }

    /// Find a day by number.
    pub fn day(&self, number: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day == number)
    }
}

/// A parsed workbook edition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub introduction: String,
    pub how_to_use: String,
    pub conclusion: String,
    pub references: String,
    pub about: String,
    /// Weeks in ascending number order.
    pub weeks: Vec<Week>,
}

impl Document {
    /// Find a week by number.
    pub fn week(&self, number: u32) -> Option<&Week> {
        self.weeks.iter().find(|w| w.number == number)
    }

    /// Text of a static section.
    pub fn section(&self, section: StaticSection) -> &str {
        match section {
            StaticSection::Introduction => &self.introduction,
            StaticSection::HowToUse => &self.how_to_use,
            StaticSection::Conclusion => &self.conclusion,
            StaticSection::References => &self.references,
            StaticSection::About => &self.about,
        }
    }

    /// Mutable slot for a static section.
    pub fn section_mut(&mut self, section: StaticSection) -> &mut String {
        match section {
            StaticSection::Introduction => &mut self.introduction,
            StaticSection::HowToUse => &mut self.how_to_use,
            StaticSection::Conclusion => &mut self.conclusion,
            StaticSection::References => &mut self.references,
            StaticSection::About => &mut self.about,
        }
    }

    /// Total number of days across all weeks.
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }
}
