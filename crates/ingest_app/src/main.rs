mod config;
mod report;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use engine_logging::{engine_warn, LogDestination};
use ingest_engine::{decode_input, PasteConverter};
use log::LevelFilter;

/// Classify a pasted page, extract its metadata and normalize its markup.
#[derive(Debug, Parser)]
#[command(name = "ingest", version)]
struct Args {
    /// HTML file to read; stdin when omitted.
    input: Option<PathBuf>,
    /// RON file with conversion settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON file with the editor's current field values to merge into.
    #[arg(long)]
    fields: Option<PathBuf>,
    /// Convert even when the paste does not look like a whole page.
    #[arg(long)]
    force: bool,
    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let destination = match args.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(destination, args.log_level.into());

    let config = config::load_config(args.config.as_deref())?;
    let fields = args
        .fields
        .as_deref()
        .map(config::load_fields)
        .transpose()?;

    let bytes = read_input(args.input.as_deref())?;
    let decoded = decode_input(&bytes);
    if decoded.had_errors {
        engine_warn!(
            "Input had malformed {} sequences; they were replaced",
            decoded.encoding_label
        );
    }

    let converter = PasteConverter::new(config);
    let report = report::build_report(&converter, &decoded.text, args.force, fields);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write report")?;
    writeln!(stdout)?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {path:?}")),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            Ok(bytes)
        }
    }
}
