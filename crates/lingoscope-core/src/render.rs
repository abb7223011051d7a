//! Turning captures into reports and text lines.
//!
//! Text output is one entry per frame:
//! `[<source>|<offset_ms>] <description> [checksum error]` followed by the
//! raw bytes. When a description is present the raw dump moves to its own
//! line, indented under the description.

use std::time::Instant;

use time::format_description::well_known::Rfc3339;

use crate::FrameReport;
use crate::pipeline::Capture;

/// Width of the offset column in text output.
const OFFSET_WIDTH: usize = 9;

/// Shared timing origin for every rendered frame in a process.
///
/// Offsets are measured from the first frame this context renders, across
/// all sources, so interleaved output from several devices lines up.
#[derive(Debug, Default)]
pub struct RenderContext {
    origin: Option<Instant>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds from the first observed instant; the first call
    /// returns 0 and fixes the origin.
    pub fn offset_ms(&mut self, at: Instant) -> u64 {
        let origin = *self.origin.get_or_insert(at);
        at.saturating_duration_since(origin).as_millis() as u64
    }

    /// Build the report entry for one capture.
    pub fn report(&mut self, capture: &Capture) -> FrameReport {
        let offset_ms = capture.received_at.map(|at| self.offset_ms(at));
        let captured_at = capture
            .timestamp
            .and_then(|timestamp| timestamp.format(&Rfc3339).ok());
        FrameReport {
            source: capture.source.clone(),
            offset_ms,
            captured_at,
            raw: capture.frame.bytes().to_vec(),
            checksum_valid: capture.checksum_valid,
            decoded: capture.decoded.description().map(str::to_string),
        }
    }
}

/// Space-prefixed lowercase hex, e.g. `" 0xff 0x55"`.
///
/// # Examples
/// ```
/// use lingoscope_core::render::hex_dump;
///
/// assert_eq!(hex_dump(&[0xff, 0x05]), " 0xff 0x05");
/// assert_eq!(hex_dump(&[]), "");
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!(" 0x{b:02x}")).collect()
}

/// Render one frame report as a text entry (without trailing newline).
pub fn format_text(report: &FrameReport) -> String {
    let offset = report
        .offset_ms
        .map_or_else(|| "-".to_string(), |ms| ms.to_string());
    let prefix = format!("[{}|{offset:>OFFSET_WIDTH$}]", report.source);

    let mut line = prefix.clone();
    if let Some(decoded) = &report.decoded {
        line.push(' ');
        line.push_str(decoded);
    }
    if !report.checksum_valid {
        line.push_str(" [checksum error]");
    }
    if report.decoded.is_some() {
        line.push('\n');
        line.push_str(&" ".repeat(prefix.chars().count()));
    }
    line.push_str(&hex_dump(&report.raw));
    line
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{RenderContext, format_text, hex_dump};
    use crate::FrameReport;
    use crate::frame::Frame;
    use crate::pipeline::Capture;

    fn report(decoded: Option<&str>, checksum_valid: bool) -> FrameReport {
        FrameReport {
            source: "2".to_string(),
            offset_ms: Some(1500),
            captured_at: None,
            raw: vec![0xff, 0xa9, 0x02, 0x00, 0x03, 0xfb],
            checksum_valid,
            decoded: decoded.map(str::to_string),
        }
    }

    #[test]
    fn offsets_are_relative_to_first_frame() {
        let mut context = RenderContext::new();
        let start = Instant::now();
        assert_eq!(context.offset_ms(start + Duration::from_millis(40)), 0);
        assert_eq!(context.offset_ms(start + Duration::from_millis(290)), 250);
        // Earlier instants clamp to the origin.
        assert_eq!(context.offset_ms(start), 0);
    }

    #[test]
    fn decoded_frame_puts_dump_on_second_line() {
        let text = format_text(&report(Some("Denon periodic status query"), true));
        let (first, second) = text.split_once('\n').unwrap();
        assert_eq!(first, "[2|     1500] Denon periodic status query");
        assert_eq!(second, format!("{} 0xff 0xa9 0x02 0x00 0x03 0xfb", " ".repeat(13)));
    }

    #[test]
    fn unrecognized_frame_stays_on_one_line() {
        let text = format_text(&report(None, false));
        assert_eq!(
            text,
            "[2|     1500] [checksum error] 0xff 0xa9 0x02 0x00 0x03 0xfb"
        );
    }

    #[test]
    fn checksum_error_follows_description() {
        let text = format_text(&report(Some("Denon periodic status query"), false));
        assert!(text.starts_with("[2|     1500] Denon periodic status query [checksum error]\n"));
    }

    #[test]
    fn missing_offset_renders_dash() {
        let mut entry = report(None, true);
        entry.offset_ms = None;
        assert!(format_text(&entry).starts_with("[2|        -] 0xff"));
    }

    #[test]
    fn context_fills_report_from_capture() {
        let frame = Frame::new(vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe]).unwrap();
        let capture = Capture::from_frame("0", frame).stamped();
        let mut context = RenderContext::new();
        let entry = context.report(&capture);
        assert_eq!(entry.offset_ms, Some(0));
        assert_eq!(entry.decoded.as_deref(), Some("Request identify"));
        assert!(entry.captured_at.is_some());
        assert_eq!(hex_dump(&entry.raw), " 0xff 0x55 0x02 0x00 0x00 0xfe");
    }
}
