use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use log::{debug, info};

use lingoscope_core::render::format_text;
use lingoscope_core::{CaptureReport, analyze_capture};

mod config;
mod monitor;

use config::{Config, SourceConfig};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LINGOSCOPE_BUILD_COMMIT"),
    " ",
    env!("LINGOSCOPE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "lingoscope")]
#[command(version = VERSION)]
#[command(
    about = "Passive decoder for dock-connector accessory traffic on serial links.",
    long_about = None,
    after_help = "Examples:\n  lingoscope monitor\n  lingoscope monitor --port /dev/ttyUSB0 --port /dev/ttyUSB1:obfuscated\n  lingoscope decode capture.bin --obfuscated --json"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode live traffic from one or more serial devices.
    Monitor {
        /// Device to listen on; append ":obfuscated" for XOR-obfuscated links
        #[arg(short, long = "port", value_name = "PATH[:obfuscated]")]
        ports: Vec<SourceConfig>,

        /// Serial line speed (default 19200)
        #[arg(short, long)]
        baud: Option<u32>,

        /// TOML file listing sources
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON object per frame instead of text
        #[arg(long)]
        json: bool,
    },
    /// Decode a recorded byte capture.
    Decode {
        /// Path to a raw capture file
        input: PathBuf,

        /// Reverse the XOR obfuscation before framing
        #[arg(long)]
        obfuscated: bool,

        /// Source label printed with each frame
        #[arg(long, default_value = "0")]
        label: String,

        /// Write the JSON report to a file
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Print the JSON report to stdout instead of text
        #[arg(long, conflicts_with = "report")]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Monitor {
            ports,
            baud,
            config,
            json,
        } => cmd_monitor(ports, baud, config, json),
        Commands::Decode {
            input,
            obfuscated,
            label,
            report,
            json,
            pretty,
            quiet,
        } => cmd_decode(input, obfuscated, &label, report, json, pretty, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_monitor(
    ports: Vec<SourceConfig>,
    baud: Option<u32>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let config = match config_path {
        Some(path) => Config::load(&path).map_err(|err| {
            CliError::new(
                format!("{err:#}"),
                Some("see `lingoscope monitor --help` for the config format".to_string()),
            )
        })?,
        None => Config::default(),
    };
    let baud_rate = baud.unwrap_or(config.baud_rate);
    let sources = if ports.is_empty() {
        config.sources
    } else {
        ports
    };
    if sources.is_empty() {
        return Err(CliError::new(
            "no sources configured",
            Some("pass --port or add [[source]] entries to the config".to_string()),
        ));
    }
    debug!("monitoring {} sources at {baud_rate} baud", sources.len());

    let opened = monitor::run(&sources, baud_rate, json)?;
    if opened == 0 {
        return Err(CliError::new(
            "no serial source could be opened",
            Some("check device paths and permissions, or pass --port".to_string()),
        ));
    }
    info!("all sources stopped");
    Ok(())
}

fn cmd_decode(
    input: PathBuf,
    obfuscated: bool,
    label: &str,
    report: Option<PathBuf>,
    json: bool,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(&resolved_input, report_path)?;
    }

    let rep = analyze_capture(&resolved_input, obfuscated, label)
        .with_context(|| format!("Failed to decode capture: {}", resolved_input.display()))?;

    if let Some(report_path) = report {
        let text = serialize_report(&rep, pretty)?;
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report_path, text)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report_path.display());
        }
        return Ok(());
    }

    if json || pretty {
        println!("{}", serialize_report(&rep, pretty)?);
        return Ok(());
    }

    for frame in &rep.frames {
        println!("{}", format_text(frame));
    }
    if !quiet {
        eprintln!(
            "{} frames, {} checksum errors, {} unrecognized",
            rep.summary.frames_total, rep.summary.checksum_errors, rep.summary.unrecognized
        );
    }
    Ok(())
}

fn serialize_report(rep: &CaptureReport, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_abs = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let Some(report_dir) = report_abs else {
        return Ok(());
    };
    let Some(file_name) = report_path.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report_path.display()),
            None,
        ));
    };
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw byte capture of the serial link".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a raw byte capture of the serial link".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single capture file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
