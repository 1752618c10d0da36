//! Page-level parsing of workbook source text.
//!
//! Three pure stages, no I/O:
//! 1. [`split_pages`] cuts a document on `PAGE BREAK`
//! 2. [`classify`] assigns each page a [`PageRole`] from an ordered rule table
//! 3. [`parse_day`] turns a day page into a [`Day`](workbook_shared::Day)
//!
//! Assembling pages into a document tree lives in `workbook-core`.

mod classify;
mod day;
mod pages;

pub use classify::{DayNumber, Page, PageRole, RULES, Rule, TABLE_OF_CONTENTS, classify, find_day_number};
pub use day::{EXAMPLE_LABELS, NOTES_MARKER, REFLECTION_MARKER, extract_example, parse_day};
pub use pages::{PAGE_BREAK, split_pages};
