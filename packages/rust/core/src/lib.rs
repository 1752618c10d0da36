//! Document assembly, cross-edition merge, and artifact output for the
//! workbook builder.
//!
//! This crate ties the page parser to whole documents and drives the
//! end-to-end build (e.g., [`pipeline::build_workbook`]).

pub mod assembler;
pub mod merge;
pub mod output;
pub mod pipeline;
