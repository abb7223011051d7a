//! Per-source decode pipeline.
//!
//! A pipeline owns one byte source and turns it into [`Capture`]s: frame,
//! checksum verdict and decode outcome. Live sources forward captures to a
//! channel drained by a single output consumer; recorded captures are
//! collected into a [`CaptureReport`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Instant;

use log::{debug, info, warn};
use thiserror::Error;
use time::OffsetDateTime;

use crate::dissect::{Decoded, decode};
use crate::frame::{Frame, FrameAssembler, FrameError, checksum};
use crate::render::RenderContext;
use crate::source::ByteSource;
use crate::{CaptureReport, make_stub_report};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// One assembled frame with its checksum verdict and decode outcome.
#[derive(Debug, Clone)]
pub struct Capture {
    pub source: String,
    /// Monotonic arrival time, used for relative offsets.
    pub received_at: Option<Instant>,
    /// Wall-clock arrival time.
    pub timestamp: Option<OffsetDateTime>,
    pub frame: Frame,
    pub checksum_valid: bool,
    pub decoded: Decoded,
}

impl Capture {
    /// Check and dissect a frame without timing information.
    pub fn from_frame(source: &str, frame: Frame) -> Self {
        let checksum_valid = checksum::is_valid(&frame);
        if !checksum_valid {
            warn!(
                "{source}: checksum mismatch (sum {:#04x}) on {} byte frame",
                checksum::sum(&frame),
                frame.len()
            );
        }
        let decoded = decode(&frame);
        Self {
            source: source.to_string(),
            received_at: None,
            timestamp: None,
            frame,
            checksum_valid,
            decoded,
        }
    }

    /// Attach the current time.
    pub fn stamped(mut self) -> Self {
        self.received_at = Some(Instant::now());
        self.timestamp = Some(OffsetDateTime::now_utc());
        self
    }
}

/// Read, check and dissect the next frame from a live source.
///
/// # Errors
/// Propagates `FrameError` from the assembler.
pub fn capture<S: ByteSource>(
    assembler: &mut FrameAssembler<S>,
    source: &str,
) -> Result<Option<Capture>, FrameError> {
    let Some(frame) = assembler.next_frame()? else {
        return Ok(None);
    };
    Ok(Some(Capture::from_frame(source, frame).stamped()))
}

/// Decode a live source until it ends or fails, sending every capture to
/// `sink`. Stops quietly when the receiving side has gone away.
///
/// # Errors
/// Returns the error that stopped the source; other pipelines are not
/// affected.
pub fn run_source<S: ByteSource>(
    label: &str,
    source: S,
    obfuscated: bool,
    sink: Sender<Capture>,
) -> Result<(), PipelineError> {
    let mut assembler = FrameAssembler::new(source, obfuscated);
    loop {
        match capture(&mut assembler, label)? {
            Some(capture) => {
                if sink.send(capture).is_err() {
                    debug!("{label}: output closed, stopping");
                    return Ok(());
                }
            }
            None => {
                info!("{label}: source closed");
                return Ok(());
            }
        }
    }
}

/// Decode a recorded capture file.
///
/// # Errors
/// Returns `PipelineError` when the file cannot be read.
pub fn analyze_capture(
    path: &Path,
    obfuscated: bool,
    label: &str,
) -> Result<CaptureReport, PipelineError> {
    let file = File::open(path)?;
    let bytes = file.metadata()?.len();
    analyze_source(
        &path.display().to_string(),
        bytes,
        BufReader::new(file),
        obfuscated,
        label,
    )
}

/// Decode every frame of a finite source into a report. A partial frame
/// at the end of input is logged and counted, not treated as an error.
///
/// # Errors
/// Returns `PipelineError` when the source itself fails.
pub fn analyze_source<S: ByteSource>(
    input_path: &str,
    input_bytes: u64,
    source: S,
    obfuscated: bool,
    label: &str,
) -> Result<CaptureReport, PipelineError> {
    let mut report = make_stub_report(input_path, input_bytes, obfuscated);
    let mut assembler = FrameAssembler::new(source, obfuscated);
    let mut context = RenderContext::new();

    loop {
        let frame = match assembler.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(FrameError::Truncated { needed, actual }) => {
                warn!("{label}: input ended mid-frame ({actual} of {needed} bytes)");
                report.summary.trailing_bytes = Some(actual as u64);
                break;
            }
            Err(err) => return Err(err.into()),
        };
        let capture = Capture::from_frame(label, frame);
        report.summary.frames_total += 1;
        if !capture.checksum_valid {
            report.summary.checksum_errors += 1;
        }
        if !capture.decoded.is_recognized() {
            report.summary.unrecognized += 1;
        }
        report.frames.push(context.report(&capture));
    }

    info!(
        "{label}: decoded {} frames ({} checksum errors, {} unrecognized)",
        report.summary.frames_total, report.summary.checksum_errors, report.summary.unrecognized
    );
    Ok(report)
}
