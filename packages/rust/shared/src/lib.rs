//! Shared types, error model, and configuration for the workbook builder.
//!
//! This crate is the foundation depended on by all other workbook crates.
//! It provides:
//! - [`WorkbookError`]: the unified error type
//! - Content tree types ([`Document`], [`Week`], [`Day`], [`StaticSection`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, OutputConfig, OutputFormat, SourcesConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, WorkbookError};
pub use types::{
    DAYS_PER_WEEK, Day, Document, StaticSection, TOTAL_DAYS, WEEK_COUNT, Week, week_for_day,
};
