//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use workbook_core::assembler::AssemblyStats;
use workbook_core::merge::MergeReport;
use workbook_core::pipeline::{self, CompiledWorkbook, MergedWorkbook};
use workbook_shared::{AppConfig, BuildConfig, OutputFormat, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Workbook builder: turns two workbook editions into one content artifact.
#[derive(Parser)]
#[command(
    name = "workbook",
    version,
    about = "Parse two editions of the 28-day workbook and merge them into a static content file.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file to use instead of ~/.workbook/workbook.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse both editions, merge examples, and write the content artifact.
    Build {
        /// Primary edition (its text is kept).
        #[arg(long)]
        primary: Option<PathBuf>,

        /// Secondary edition (contributes example passages).
        #[arg(long)]
        secondary: Option<PathBuf>,

        /// Artifact path.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Artifact format: json or js-module.
        #[arg(short, long)]
        format: Option<String>,

        /// Binding name for js-module output.
        #[arg(long)]
        export_name: Option<String>,

        /// Print the artifact to stdout instead of writing it.
        #[arg(long)]
        stdout: bool,

        /// Fail if any page was rejected by validation.
        #[arg(long)]
        strict: bool,
    },

    /// Parse a single edition and print its content tree as JSON.
    Parse {
        /// Source text file.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so artifacts
/// printed to stdout stay clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "workbook=info",
        1 => "workbook=debug",
        _ => "workbook=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build {
            primary,
            secondary,
            out,
            format,
            export_name,
            stdout,
            strict,
        } => {
            let overrides = BuildOverrides {
                primary,
                secondary,
                out,
                format,
                export_name,
            };
            cmd_build(&config, overrides, stdout, strict)
        }
        Command::Parse { file } => cmd_parse(&file),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    })
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

/// CLI flags that override `[sources]` / `[output]`.
struct BuildOverrides {
    primary: Option<PathBuf>,
    secondary: Option<PathBuf>,
    out: Option<PathBuf>,
    format: Option<String>,
    export_name: Option<String>,
}

impl BuildOverrides {
    fn apply(self, config: &AppConfig) -> Result<BuildConfig> {
        let mut build = BuildConfig::from(config);
        if let Some(primary) = self.primary {
            build.primary = primary;
        }
        if let Some(secondary) = self.secondary {
            build.secondary = secondary;
        }
        if let Some(out) = self.out {
            build.output = out;
        }
        if let Some(format) = self.format {
            build.format = format.parse::<OutputFormat>()?;
        }
        if let Some(export_name) = self.export_name {
            build.export_name = export_name;
        }
        Ok(build)
    }
}

fn cmd_build(config: &AppConfig, overrides: BuildOverrides, stdout: bool, strict: bool) -> Result<()> {
    let build = overrides.apply(config)?;

    info!(
        primary = %build.primary.display(),
        secondary = %build.secondary.display(),
        format = %build.format,
        "building workbook"
    );

    if stdout {
        let CompiledWorkbook { workbook, rendered } = pipeline::compile_workbook(&build)?;
        check_strict(&workbook, strict)?;
        print!("{rendered}");
        return Ok(());
    }

    let result = pipeline::build_workbook(&build)?;
    check_strict(&result.workbook, strict)?;

    let workbook = &result.workbook;
    println!();
    println!("  Workbook built successfully!");
    println!("  Weeks:    {}", workbook.document.weeks.len());
    println!("  Days:     {}", workbook.document.day_count());
    print_stats("Primary", &workbook.primary.stats);
    print_stats("Secondary", &workbook.secondary.stats);
    print_merge(&workbook.merge);
    println!("  Issues:   {}", workbook.issues().count());
    println!("  Path:     {}", result.artifact.path.display());
    println!("  SHA-256:  {}", result.artifact.sha256);
    println!("  Time:     {:.1}ms", result.elapsed.as_secs_f64() * 1000.0);
    println!();

    Ok(())
}

fn check_strict(workbook: &MergedWorkbook, strict: bool) -> Result<()> {
    let count = workbook.issues().count();
    if strict && count > 0 {
        let details: Vec<String> = workbook.issues().map(ToString::to_string).collect();
        return Err(eyre!(
            "{count} page(s) rejected in strict mode:\n  {}",
            details.join("\n  ")
        ));
    }
    Ok(())
}

fn print_stats(label: &str, stats: &AssemblyStats) {
    println!(
        "  {label:<9} {} pages, {} days, {} duplicates, {} unrecognized, {} rejected",
        stats.pages, stats.days, stats.duplicate_days, stats.unrecognized, stats.rejected
    );
}

fn print_merge(merge: &MergeReport) {
    println!(
        "  Examples: {} inserted, {} appended, {} already present, {} without counterpart",
        merge.inserted, merge.appended, merge.already_present, merge.missing_counterpart
    );
}

// ---------------------------------------------------------------------------
// parse / config
// ---------------------------------------------------------------------------

fn cmd_parse(file: &Path) -> Result<()> {
    let assembly = pipeline::parse_source(file)?;
    for issue in &assembly.issues {
        eprintln!("warning: {issue}");
    }
    println!("{}", serde_json::to_string_pretty(&assembly.document)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    println!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
