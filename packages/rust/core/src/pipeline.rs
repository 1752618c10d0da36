//! End-to-end build: sources → assemble ×2 → merge → render → artifact.

use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument, warn};

use workbook_shared::{BuildConfig, Document, Result, WorkbookError};

use crate::assembler::{Assembly, AssemblyStats, assemble_document};
use crate::merge::{MergeReport, merge_examples};
use crate::output::{self, ArtifactMeta};

/// What assembly reported for one source.
#[derive(Debug)]
pub struct SourceReport {
    pub stats: AssemblyStats,
    pub issues: Vec<WorkbookError>,
}

impl From<Assembly> for SourceReport {
    fn from(assembly: Assembly) -> Self {
        Self {
            stats: assembly.stats,
            issues: assembly.issues,
        }
    }
}

/// Both editions assembled and merged into the primary tree.
#[derive(Debug)]
pub struct MergedWorkbook {
    pub document: Document,
    pub primary: SourceReport,
    pub secondary: SourceReport,
    pub merge: MergeReport,
}

impl MergedWorkbook {
    /// Validation issues from both sources.
    pub fn issues(&self) -> impl Iterator<Item = &WorkbookError> {
        self.primary.issues.iter().chain(&self.secondary.issues)
    }
}

/// A merged workbook and its rendered artifact text.
#[derive(Debug)]
pub struct CompiledWorkbook {
    pub workbook: MergedWorkbook,
    pub rendered: String,
}

/// Result of [`build_workbook`].
#[derive(Debug)]
pub struct BuildResult {
    pub workbook: MergedWorkbook,
    pub artifact: ArtifactMeta,
    pub elapsed: std::time::Duration,
}

/// Read a source document. A single attempt; failures carry the path.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| WorkbookError::io(path, e))
}

/// Read and assemble a single source without merging.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_source(path: &Path) -> Result<Assembly> {
    let text = read_source(path)?;
    Ok(assemble_document(&text))
}

/// Assemble both editions and merge the secondary's examples into the primary.
pub fn merge_sources(primary_text: &str, secondary_text: &str) -> MergedWorkbook {
    let Assembly {
        mut document,
        issues,
        stats,
    } = assemble_document(primary_text);
    let secondary = assemble_document(secondary_text);

    let merge = merge_examples(&mut document, &secondary.document);

    MergedWorkbook {
        document,
        primary: SourceReport { stats, issues },
        secondary: secondary.into(),
        merge,
    }
}

/// Read, merge, and render, without writing anything.
#[instrument(skip_all, fields(primary = %config.primary.display(), secondary = %config.secondary.display()))]
pub fn compile_workbook(config: &BuildConfig) -> Result<CompiledWorkbook> {
    config.validate()?;

    let primary = read_source(&config.primary)?;
    let secondary = read_source(&config.secondary)?;

    let workbook = merge_sources(&primary, &secondary);
    for issue in workbook.issues() {
        warn!(error = %issue, "source issue");
    }

    let rendered = output::render(&workbook.document, config.format, &config.export_name)?;
    Ok(CompiledWorkbook { workbook, rendered })
}

/// Run the full build and write the artifact to `config.output`.
#[instrument(skip_all, fields(output = %config.output.display(), format = %config.format))]
pub fn build_workbook(config: &BuildConfig) -> Result<BuildResult> {
    let start = Instant::now();

    let CompiledWorkbook { workbook, rendered } = compile_workbook(config)?;
    let artifact = output::write_artifact(&config.output, &rendered)?;

    info!(
        weeks = workbook.document.weeks.len(),
        days = workbook.document.day_count(),
        merged = workbook.merge.merged(),
        sha256 = %artifact.sha256,
        "workbook built"
    );

    Ok(BuildResult {
        workbook,
        artifact,
        elapsed: start.elapsed(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use workbook_shared::OutputFormat;

    const PRIMARY_FIXTURE: &str = "../../../fixtures/text/primary.txt";
    const SECONDARY_FIXTURE: &str = "../../../fixtures/text/secondary.txt";

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wb-pipeline-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fixture_config(output: PathBuf, format: OutputFormat) -> BuildConfig {
        BuildConfig {
            primary: PRIMARY_FIXTURE.into(),
            secondary: SECONDARY_FIXTURE.into(),
            output,
            format,
            export_name: "meditationData".into(),
        }
    }

    #[test]
    fn two_page_scenario_merges_example_before_reflections() {
        let primary = "WEEK 1: TITLE\nDay 1: Intro\nbody\nPAGE BREAK\n\
                       Day 2: Next\nbody2\nReflection Questions: q";
        let secondary = "WEEK 1: TITLE\nDay 1: Intro\nbody\nPAGE BREAK\n\
                         Day 2: Next\nbody2\nReal-World Example: foo\nReflection Questions: q";
        let workbook = merge_sources(primary, secondary);

        let week = workbook.document.week(1).unwrap();
        assert_eq!(week.title, "WEEK 1: TITLE");
        assert_eq!(week.days.len(), 2);
        assert_eq!(week.day(1).unwrap().full_text, "body");

        let day2 = week.day(2).unwrap();
        assert_eq!(
            day2.full_text,
            "body2\n\nReal-World Example: foo\n\nReflection Questions: q"
        );
        assert_eq!(workbook.merge.inserted, 1);
        assert_eq!(workbook.merge.without_example, 1);

        let again = merge_sources(primary, secondary);
        assert_eq!(again.document, workbook.document);
    }

    #[test]
    fn example_already_in_primary_is_not_repeated() {
        let doc = "Day 2: Next\nbody2\nReal-World Example: foo\nReflection Questions: q";
        let workbook = merge_sources(doc, doc);

        let day2 = workbook.document.week(1).unwrap().day(2).unwrap();
        assert_eq!(workbook.merge.already_present, 1);
        assert_eq!(day2.full_text.matches("Real-World Example: foo").count(), 1);
    }

    #[test]
    fn secondary_example_lands_in_primary() {
        let primary = "Day 3: Limits\nText.\nReflection Questions:\nWhat now?";
        let secondary = "Day 3: Limits\nOther text.\nMovie Example: Groundhog Day\nReflection Questions:\nWhat now?";
        let workbook = merge_sources(primary, secondary);

        assert_eq!(
            workbook.document.week(1).unwrap().days[0].full_text,
            "Text.\n\nMovie Example: Groundhog Day\n\nReflection Questions:\n\nWhat now?"
        );
        assert_eq!(workbook.merge.inserted, 1);
    }

    #[test]
    fn fixtures_assemble_every_day() {
        let assembly = parse_source(Path::new(PRIMARY_FIXTURE)).unwrap();
        let doc = &assembly.document;

        assert!(doc.introduction.starts_with("Introduction: Welcome to Imperfection"));
        assert!(doc.how_to_use.starts_with("How to Use This Workbook"));
        assert!(doc.conclusion.starts_with("Conclusion:"));
        assert!(doc.references.starts_with("References"));
        assert!(doc.about.starts_with("About This Workbook"));

        assert_eq!(doc.weeks.len(), 4);
        assert_eq!(doc.day_count(), 28);
        assert_eq!(doc.weeks[0].title, "WEEK 1: EMBRACING REALITY");
        assert_eq!(doc.weeks[0].days[0].day, 1);
        assert_eq!(assembly.stats.table_of_contents, 1);
        assert_eq!(assembly.stats.duplicate_days, 1);
        assert!(assembly.issues.is_empty());
    }

    #[test]
    fn build_writes_artifact_and_is_byte_identical_on_rerun() {
        let tmp = temp_dir();
        let config = fixture_config(tmp.join("public/data.js"), OutputFormat::JsModule);

        let first = build_workbook(&config).unwrap();
        let second = build_workbook(&config).unwrap();
        assert_eq!(first.artifact.sha256, second.artifact.sha256);
        assert!(first.workbook.merge.merged() > 0);

        let written = std::fs::read_to_string(&config.output).unwrap();
        assert!(written.starts_with("export const meditationData = "));
        assert!(written.contains("Movie Example:"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn merging_a_merged_document_changes_nothing() {
        let primary = read_source(Path::new(PRIMARY_FIXTURE)).unwrap();
        let secondary = read_source(Path::new(SECONDARY_FIXTURE)).unwrap();

        let mut once = merge_sources(&primary, &secondary).document;
        let snapshot = once.clone();
        let secondary_doc = assemble_document(&secondary).document;
        let report = merge_examples(&mut once, &secondary_doc);

        assert_eq!(report.merged(), 0);
        assert_eq!(once, snapshot);
    }

    #[test]
    fn unreadable_source_is_io_error() {
        let tmp = temp_dir();
        let mut config = fixture_config(tmp.join("out.json"), OutputFormat::Json);
        config.secondary = tmp.join("missing.txt");

        let err = build_workbook(&config).unwrap_err();
        assert!(matches!(err, WorkbookError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
        assert!(!config.output.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_config_fails_before_reading() {
        let mut config = fixture_config("unused.js".into(), OutputFormat::JsModule);
        config.export_name = "not valid".into();
        config.primary = "/nonexistent/primary.txt".into();

        let err = compile_workbook(&config).unwrap_err();
        assert!(matches!(err, WorkbookError::Config { .. }));
    }
}
