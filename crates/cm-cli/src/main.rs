//! CLI entry point for the cm-obfuscate tool.
//!
//! This binary replaces CSS class names and element IDs across a set of
//! HTML, JavaScript, and CSS files with random alphanumeric tokens, keeping
//! every reference consistent between files.
//!
//! # Usage
//!
//! ```bash
//! cm-obfuscate [OPTIONS] <COMMAND>
//!
//! # Rewrite files in place and keep the mapping
//! cm-obfuscate apply site/index.html site/style.css --mapping-out mapping.json
//!
//! # Preview the mapping for a whole directory without touching anything
//! cm-obfuscate scan site --format json
//!
//! # Reproducible tokens
//! cm-obfuscate --seed 42 --token-length 10 apply site
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use cm_core::{Config, IdentifierKind};
use cm_pipeline::{Mapping, Pipeline, PipelineError, RunReport, RunStats, TracingObserver};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Obfuscates CSS class names and element IDs across web source files.
///
/// Every class name and ID found in the given files is replaced by one
/// random token, the same token in every file that references it.
#[derive(Parser)]
#[command(name = "cm-obfuscate", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "CM_OBFUSCATE_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Length of generated tokens (overrides the configuration file).
    #[arg(long, global = true)]
    token_length: Option<usize>,

    /// Seed for reproducible tokens (overrides the configuration file).
    #[arg(long, global = true, env = "CM_OBFUSCATE_SEED")]
    seed: Option<u64>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Rewrite files in place.
    Apply {
        /// Files or directories to process.
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,

        /// Write the identifier to token mapping to this file as JSON.
        #[arg(short, long)]
        mapping_out: Option<Utf8PathBuf>,
    },

    /// Show the mapping that `apply` would use, without modifying files.
    Scan {
        /// Files or directories to process.
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Mapping output format.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned plain text.
    Text,
    /// JSON object keyed by namespace.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Logs go to stderr so stdout stays clean for mapping output.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded or the
/// resulting configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_ref())?;

    if let Some(length) = cli.token_length {
        config.token_length = length;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the full pipeline, rewriting files in place.
///
/// # Errors
///
/// Returns an error on a fatal pipeline error or if the mapping file
/// cannot be written.
fn run_apply(
    config: Config,
    paths: &[Utf8PathBuf],
    mapping_out: Option<&Utf8PathBuf>,
) -> color_eyre::Result<()> {
    let pipeline = Pipeline::from_inputs(config, paths)?;
    info!(files = pipeline.files().len(), "Rewriting files");

    let report = pipeline.run(&mut TracingObserver)?;

    if let Some(path) = mapping_out {
        std::fs::write(path.as_std_path(), render_json(&report.mapping)?)?;
        info!(path = %path, "Mapping written");
    }

    print_stats_summary(&report.stats, true);
    print_errors(&report.errors)?;

    Ok(())
}

/// Runs the scan and build phases and prints the proposed mapping.
///
/// # Errors
///
/// Returns an error on a fatal pipeline error or if output fails.
fn run_scan(config: Config, paths: &[Utf8PathBuf], format: OutputFormat) -> color_eyre::Result<()> {
    let pipeline = Pipeline::from_inputs(config, paths)?;
    let report: RunReport = pipeline.scan(&mut TracingObserver)?;

    let content = match format {
        OutputFormat::Text => render_text(&report.mapping),
        OutputFormat::Json => render_json(&report.mapping)?,
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{content}")?;
    drop(handle);

    if matches!(format, OutputFormat::Text) {
        print_stats_summary(&report.stats, false);
    }
    print_errors(&report.errors)?;

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints a summary of run statistics.
fn print_stats_summary(stats: &RunStats, rewrote: bool) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Obfuscation Summary");
    let _ = writeln!(handle, "===================");
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Files listed:       {}", stats.files_total);
    let _ = writeln!(handle, "  Scanned:          {}", stats.files_scanned);
    if rewrote {
        let _ = writeln!(handle, "  Rewritten:        {}", stats.files_rewritten);
        let _ = writeln!(
            handle,
            "  Changed:          {} (at least one reference replaced)",
            stats.files_changed
        );
    }
    let _ = writeln!(
        handle,
        "  Failed:           {}",
        stats.scan_failures + stats.rewrite_failures
    );
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Class names:        {}", stats.class_names);
    let _ = writeln!(handle, "Element IDs:        {}", stats.element_ids);
    if rewrote {
        let _ = writeln!(handle, "References replaced: {}", stats.replacements);
    }
}

/// Lists per-file failures on stderr.
fn print_errors(errors: &[(Utf8PathBuf, PipelineError)]) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    writeln!(handle)?;
    writeln!(handle, "Errors ({}):", errors.len())?;
    for (path, error) in errors {
        writeln!(handle, "  {path} - {error}")?;
    }
    Ok(())
}

/// Renders the mapping as pretty-printed JSON with a trailing newline.
fn render_json(mapping: &Mapping) -> color_eyre::Result<String> {
    let mut json = serde_json::to_string_pretty(mapping)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize mapping: {}", e))?;
    json.push('\n');
    Ok(json)
}

/// Renders the mapping as one `selector -> token` line per identifier.
fn render_text(mapping: &Mapping) -> String {
    use std::fmt::Write;

    let width = IdentifierKind::ALL
        .iter()
        .flat_map(|kind| mapping.iter(*kind).map(|(name, _)| name.len() + 1))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for kind in IdentifierKind::ALL {
        for (name, token) in mapping.iter(kind) {
            let selector = format!("{}{name}", kind.css_prefix());
            let _ = writeln!(output, "{selector:<width$}  ->  {}{token}", kind.css_prefix());
        }
    }
    output
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Resolve configuration
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Apply { paths, mapping_out } => run_apply(config, paths, mapping_out.as_ref()),
        Commands::Scan { paths, format } => run_scan(config, paths, *format),
    }
}
