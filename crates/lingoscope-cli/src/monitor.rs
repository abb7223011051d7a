use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{error, info, warn};
use serialport::SerialPort;

use lingoscope_core::render::format_text;
use lingoscope_core::{Capture, RenderContext, run_source};

use crate::config::SourceConfig;

/// Read timeout on each device; timeouts are retried by the pipeline.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

fn open_port(path: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>> {
    let mut builder = serialport::new(path, baud_rate).timeout(READ_TIMEOUT);
    #[cfg(unix)]
    {
        builder = builder
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None);
    }
    builder
        .open()
        .map_err(|e| anyhow!("Failed to open serial port {}: {}", path, e))
}

/// Start one pipeline thread per device and print frames as they arrive.
///
/// Devices that cannot be opened are reported once and skipped. Returns
/// when every pipeline has stopped.
pub fn run(sources: &[SourceConfig], baud_rate: u32, json: bool) -> Result<usize> {
    let (tx, rx) = mpsc::channel::<Capture>();
    let mut workers = Vec::new();

    for source in sources {
        let label = source.label();
        let port = match open_port(&source.path, baud_rate) {
            Ok(port) => port,
            Err(err) => {
                error!("{label}: source unavailable: {err}");
                continue;
            }
        };
        info!(
            "{label}: monitoring {} at {baud_rate} baud{}",
            source.path,
            if source.obfuscated { " (obfuscated)" } else { "" }
        );
        let obfuscated = source.obfuscated;
        let sink = tx.clone();
        let handle = thread::Builder::new()
            .name(format!("source-{label}"))
            .spawn(move || {
                if let Err(err) = run_source(&label, port, obfuscated, sink) {
                    error!("{label}: source stopped: {err}");
                }
            })
            .context("Failed to spawn source thread")?;
        workers.push(handle);
    }
    drop(tx);

    let opened = workers.len();
    if opened == 0 {
        return Ok(0);
    }

    if !print_captures(rx, json)? {
        // Output closed; idle pipelines end with the process.
        return Ok(opened);
    }
    for worker in workers {
        if worker.join().is_err() {
            warn!("source thread panicked");
        }
    }
    Ok(opened)
}

/// Single output consumer: owns the timing origin and stdout so entries
/// from different sources never interleave. Returns `false` when stdout
/// was closed before every source finished.
fn print_captures(rx: Receiver<Capture>, json: bool) -> Result<bool> {
    let mut context = RenderContext::new();
    let stdout = io::stdout();
    for capture in rx {
        let report = context.report(&capture);
        let line = if json {
            serde_json::to_string(&report).context("JSON serialization failed")?
        } else {
            format_text(&report)
        };
        let mut out = stdout.lock();
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            if err.kind() == io::ErrorKind::BrokenPipe {
                return Ok(false);
            }
            return Err(err).context("Failed to write to stdout");
        }
    }
    Ok(true)
}
