//! Rendering and writing the static content artifact.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use workbook_shared::{Document, OutputFormat, Result, WorkbookError};

/// Metadata for a written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMeta {
    pub path: PathBuf,
    /// Hex SHA-256 of the written bytes.
    pub sha256: String,
    pub size_bytes: usize,
}

/// Render `document` in the requested format.
///
/// `js-module` output is `export const <export_name> = <json>;` so the UI can
/// import it directly. Both formats end with a newline.
pub fn render(document: &Document, format: OutputFormat, export_name: &str) -> Result<String> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| WorkbookError::Serialization(format!("JSON serialization failed: {e}")))?;

    Ok(match format {
        OutputFormat::Json => format!("{json}\n"),
        OutputFormat::JsModule => format!("export const {export_name} = {json};\n"),
    })
}

/// Hex SHA-256 of `content`.
pub fn checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Write `content` to `path` atomically (temp file, then rename).
#[instrument(skip_all, fields(path = %path.display(), size = content.len()))]
pub fn write_artifact(path: &Path, content: &str) -> Result<ArtifactMeta> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| WorkbookError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| WorkbookError::config(format!("output path {} has no file name", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, content).map_err(|e| WorkbookError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| WorkbookError::io(path, e))?;

    let sha256 = checksum(content);
    debug!(%sha256, "wrote artifact");

    Ok(ArtifactMeta {
        path: path.to_path_buf(),
        sha256,
        size_bytes: content.len(),
    })
}
