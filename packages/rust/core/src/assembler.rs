//! Document assembler.
//!
//! Folds classified pages into a [`Document`]. The accumulating tree is a
//! [`DocumentBuilder`] owned by the caller: [`apply_page`] takes it by value
//! and hands it back, so every page's effect is visible at the call site.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, info, instrument, warn};

use workbook_parser::{DayNumber, Page, PageRole, classify, parse_day, split_pages};
use workbook_shared::{
    Day, Document, Result, StaticSection, TOTAL_DAYS, WEEK_COUNT, Week, WorkbookError,
    week_for_day,
};

/// Output of one assembly pass over a source document.
#[derive(Debug)]
pub struct Assembly {
    /// The assembled content tree.
    pub document: Document,
    /// Validation problems that caused a page or day to be skipped.
    pub issues: Vec<WorkbookError>,
    /// Per-role page counts.
    pub stats: AssemblyStats,
}

/// What happened to the pages of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Pages after splitting.
    pub pages: usize,
    /// Table-of-contents pages skipped.
    pub table_of_contents: usize,
    /// Static section pages recorded.
    pub sections: usize,
    /// Week intro pages (including those that also carry a day).
    pub week_intros: usize,
    /// Days attached to a week.
    pub days: usize,
    /// Day detections ignored because the day already existed.
    pub duplicate_days: usize,
    /// Pages no rule recognized.
    pub unrecognized: usize,
    /// Pages or days rejected by validation.
    pub rejected: usize,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Mutable accumulator for one document.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sections: Document,
    weeks: BTreeMap<u32, Week>,
    issues: Vec<WorkbookError>,
    stats: AssemblyStats,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get week `number`, creating a `Week {n}` placeholder if needed.
    pub fn ensure_week(&mut self, number: u32) -> Result<&mut Week> {
        if !(1..=WEEK_COUNT).contains(&number) {
            return Err(WorkbookError::validation(format!(
                "week {number} is outside 1..={WEEK_COUNT}"
            )));
        }

        Ok(match self.weeks.entry(number) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                debug!(week = number, "created placeholder week");
                slot.insert(Week::placeholder(number))
            }
        })
    }

    /// Append `day` to week `week` unless that day number is already there.
    ///
    /// Returns `Ok(false)` when the day was a duplicate and dropped.
    pub fn add_day(&mut self, week: u32, day: Day) -> Result<bool> {
        validate_day(day.day)?;

        let number = day.day;
        let target = self.ensure_week(week)?;
        if target.day(number).is_some() {
            debug!(week, day = number, "duplicate day ignored");
            self.stats.duplicate_days += 1;
            return Ok(false);
        }

        target.days.push(day);
        self.stats.days += 1;
        Ok(true)
    }

    /// Store a static section verbatim.
    pub fn set_section(&mut self, section: StaticSection, text: &str) {
        *self.sections.section_mut(section) = text.to_string();
        self.stats.sections += 1;
    }

    /// Look at a week without creating it.
    pub fn week(&self, number: u32) -> Option<&Week> {
        self.weeks.get(&number)
    }

    fn reject(&mut self, err: WorkbookError) {
        warn!(error = %err, "page rejected");
        self.stats.rejected += 1;
        self.issues.push(err);
    }

    /// Freeze into a [`Document`] with weeks in ascending order.
    pub fn finish(self) -> Assembly {
        let document = Document {
            weeks: self.weeks.into_values().collect(),
            ..self.sections
        };
        Assembly {
            document,
            issues: self.issues,
            stats: self.stats,
        }
    }
}

fn validate_day(day: u32) -> Result<()> {
    if (1..=TOTAL_DAYS).contains(&day) {
        Ok(())
    } else {
        Err(WorkbookError::validation(format!(
            "day {day} is outside 1..={TOTAL_DAYS}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Page handlers
// ---------------------------------------------------------------------------

/// Apply one classified page to the builder.
pub fn apply_page(mut builder: DocumentBuilder, page: &Page<'_>, role: PageRole) -> DocumentBuilder {
    let outcome = match role {
        PageRole::TableOfContents => {
            builder.stats.table_of_contents += 1;
            Ok(())
        }
        PageRole::Section(section) => {
            builder.set_section(section, page.text);
            Ok(())
        }
        PageRole::WeekIntro { week, day } => apply_week_intro(&mut builder, page, week, day),
        PageRole::Day { day } => apply_day(&mut builder, page, day),
        PageRole::Unrecognized => {
            debug!(first_line = page.first_line, "unrecognized page dropped");
            builder.stats.unrecognized += 1;
            Ok(())
        }
    };

    if let Err(err) = outcome {
        builder.reject(err);
    }
    builder
}

fn apply_week_intro(
    builder: &mut DocumentBuilder,
    page: &Page<'_>,
    week: u32,
    day: Option<DayNumber>,
) -> Result<()> {
    let entry = builder.ensure_week(week)?;
    entry.title = page.first_line.to_string();
    entry.intro = page.text.to_string();
    builder.stats.week_intros += 1;

    match day {
        Some(number) => {
            let number = number.value()?;
            builder.add_day(week, parse_day(page.text, number)).map(drop)
        }
        None => Ok(()),
    }
}

fn apply_day(builder: &mut DocumentBuilder, page: &Page<'_>, day: DayNumber) -> Result<()> {
    let day = day.value()?;
    validate_day(day)?;
    builder
        .add_day(week_for_day(day), parse_day(page.text, day))
        .map(drop)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Split, classify, and assemble a whole source document.
#[instrument(skip_all, fields(len = text.len()))]
pub fn assemble_document(text: &str) -> Assembly {
    let pages = split_pages(text);

    let mut builder = DocumentBuilder::new();
    builder.stats.pages = pages.len();

    for raw in pages {
        let page = Page::new(raw);
        let role = classify(&page);
        builder = apply_page(builder, &page, role);
    }

    let assembly = builder.finish();
    info!(
        pages = assembly.stats.pages,
        weeks = assembly.document.weeks.len(),
        days = assembly.document.day_count(),
        issues = assembly.issues.len(),
        "document assembled"
    );
    assembly
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
