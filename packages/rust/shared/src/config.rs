//! Application configuration for the workbook builder.
//!
//! User config lives at `~/.workbook/workbook.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkbookError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "workbook.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".workbook";

// ---------------------------------------------------------------------------
// Config structs (matching workbook.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// The two source editions.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Where and how the content artifact is written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[sources]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Edition whose text is kept and enriched.
    #[serde(default = "default_primary")]
    pub primary: String,

    /// Edition that only contributes example passages.
    #[serde(default = "default_secondary")]
    pub secondary: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
        }
    }
}

fn default_primary() -> String {
    "doc1.txt".into()
}
fn default_secondary() -> String {
    "doc2.txt".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact path.
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Artifact format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Binding name used by the `js-module` format.
    #[serde(default = "default_export_name")]
    pub export_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
            export_name: default_export_name(),
        }
    }
}

fn default_output_path() -> String {
    "public/data.js".into()
}
fn default_export_name() -> String {
    "meditationData".into()
}

/// Serialization format of the content artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// `export const <name> = <json>;`
    #[default]
    JsModule,
}

impl std::str::FromStr for OutputFormat {
    type Err = WorkbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "js-module" | "js" => Ok(Self::JsModule),
            other => Err(WorkbookError::config(format!(
                "unknown output format '{other}': expected 'json' or 'js-module'"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::JsModule => f.write_str("js-module"),
        }
    }
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Primary edition path.
    pub primary: PathBuf,
    /// Secondary edition path.
    pub secondary: PathBuf,
    /// Artifact path.
    pub output: PathBuf,
    /// Artifact format.
    pub format: OutputFormat,
    /// Binding name for `js-module` output.
    pub export_name: String,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            primary: PathBuf::from(&config.sources.primary),
            secondary: PathBuf::from(&config.sources.secondary),
            output: PathBuf::from(&config.output.path),
            format: config.output.format,
            export_name: config.output.export_name.clone(),
        }
    }
}

impl BuildConfig {
    /// Reject settings the renderer cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.format == OutputFormat::JsModule && !is_js_identifier(&self.export_name) {
            return Err(WorkbookError::config(format!(
                "export name '{}' is not a valid JavaScript identifier",
                self.export_name
            )));
        }
        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.workbook/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WorkbookError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.workbook/workbook.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WorkbookError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WorkbookError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WorkbookError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| WorkbookError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WorkbookError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
