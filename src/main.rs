//! answerviz CLI - inspect chart payloads and answer tables from the terminal.

use anyhow::{bail, Context, Result};
use answerviz::answer::{parse_chart_payload, AnswerDocument};
use answerviz::clipboard::CopyOutcome;
use answerviz::constants::DEFAULT_CHART_TAG;
use answerviz::formatters::{Formatter, NamedFormatter};
use answerviz::pipeline::{normalize_chart_config, RenderableChart};
use answerviz::settings::Settings;
use answerviz::types::ConfigValue;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "answerviz")]
#[command(version)]
#[command(about = "Normalize chart configurations and extract answer tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a chart configuration and print it as JSON
    Normalize {
        /// JSON configuration, or answer text when --tag is given
        file: PathBuf,

        /// Read the configuration from between <TAG> and </TAG> (default tag: chart)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CHART_TAG)]
        tag: Option<String>,

        /// Print the renderer view (type, series, options, caption)
        #[arg(long)]
        renderable: bool,
    },

    /// Print the first markdown table of an answer as HTML
    Table {
        file: PathBuf,

        /// Also copy the table to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Apply a formatter expression to a JSON value
    Format {
        /// Expression, e.g. "v => v + '%'" or "currency_mxn"
        expr: String,

        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {:?}", path)),
        None => Ok(Settings::load()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn normalize(file: &Path, tag: Option<&str>, renderable: bool, settings: &Settings) -> Result<()> {
    let input = read_input(file)?;
    let raw = match tag {
        Some(tag) => parse_chart_payload(&input, tag)
            .with_context(|| format!("Failed to read <{}> payload from {:?}", tag, file))?,
        None => ConfigValue::from_json_str(&input)
            .with_context(|| format!("Failed to parse JSON from {:?}", file))?,
    };

    let normalized = normalize_chart_config(raw, settings);
    let output = if renderable {
        serde_json::to_string_pretty(&RenderableChart::from_config(&normalized.config))?
    } else {
        serde_json::to_string_pretty(&normalized.config)?
    };
    println!("{output}");

    let report = &normalized.report;
    for failure in &report.failures {
        eprintln!("failed to compile {}: {} ({})", failure.path, failure.expression, failure.error);
    }
    for removed in &report.removed {
        eprintln!("removed invalid callback {}: {}", removed.path, removed.value);
    }
    info!(
        failures = report.failures.len(),
        removed = report.removed.len(),
        "Normalization finished"
    );
    Ok(())
}

#[cfg(feature = "system-clipboard")]
fn copy_to_clipboard(answer: &AnswerDocument) -> Option<CopyOutcome> {
    let html = answer.table_html()?;
    Some(answerviz::clipboard::copy_html_to_system_clipboard(&html))
}

#[cfg(not(feature = "system-clipboard"))]
fn copy_to_clipboard(_answer: &AnswerDocument) -> Option<CopyOutcome> {
    Some(CopyOutcome::Unsupported)
}

fn table(file: &Path, copy: bool) -> Result<()> {
    let answer = AnswerDocument::new(read_input(file)?);
    let Some(html) = answer.table_html() else {
        bail!("No markdown table found in {:?}", file);
    };
    println!("{html}");

    if copy {
        match copy_to_clipboard(&answer) {
            Some(CopyOutcome::Copied(format)) => eprintln!("copied table as {:?}", format),
            Some(CopyOutcome::Unsupported) => eprintln!("clipboard not available"),
            Some(CopyOutcome::Denied(msg)) | Some(CopyOutcome::Failed(msg)) => {
                eprintln!("copy failed: {msg}")
            }
            None => {}
        }
    }
    Ok(())
}

fn apply_formatter(expr: &str, value: &str) -> Result<()> {
    let formatter = match NamedFormatter::from_name(expr.trim()) {
        Some(named) => Formatter::named(named),
        None => Formatter::compile(expr).with_context(|| format!("Failed to compile {:?}", expr))?,
    };
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    println!("{}", formatter.call(&value));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Normalize {
            file,
            tag,
            renderable,
        } => normalize(&file, tag.as_deref(), renderable, &settings),
        Commands::Table { file, copy } => table(&file, copy),
        Commands::Format { expr, value } => apply_formatter(&expr, &value),
    }
}
