//! Lingoscope core library for passive accessory-protocol decoding.
//!
//! This crate implements the decode pipeline used by the CLI: a byte
//! source feeds the frame assembler (reversing the optional XOR
//! obfuscation), each frame is checked against its running checksum and
//! dissected through the command catalogs (transport family -> lingo ->
//! opcode -> argument layout), and the result is turned into a report.
//! Dissection is byte-oriented and side-effect free; device I/O stays in
//! the CLI, which only hands this crate something implementing
//! [`std::io::Read`].
//!
//! Invariants:
//! - No state is kept between frames; each source decodes independently.
//! - Checksum status and decoded text are always reported together.
//! - Unknown but well-formed traffic is a normal result, never an error.
//!
//! # Examples
//! ```
//! use std::io::Cursor;
//!
//! use lingoscope_core::{FrameAssembler, checksum, decode};
//!
//! let wire = vec![0xff, 0x55, 0x03, 0x04, 0x00, 0x1c, 0xdd];
//! let mut assembler = FrameAssembler::new(Cursor::new(wire), false);
//! let frame = assembler.next_frame()?.expect("frame");
//! assert!(checksum::is_valid(&frame));
//! assert_eq!(
//!     decode(&frame).description(),
//!     Some("Request time and status info")
//! );
//! # Ok::<(), lingoscope_core::FrameError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod codec;
pub mod dissect;
pub mod frame;
pub mod pipeline;
pub mod protocols;
pub mod render;
pub mod source;

pub use dissect::{Decoded, decode, decode_bytes};
pub use frame::{Frame, FrameAssembler, FrameError, checksum};
pub use pipeline::{Capture, PipelineError, analyze_capture, analyze_source, run_source};
pub use render::RenderContext;
pub use source::{ByteSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded capture with per-frame results in arrival order.
///
/// # Examples
/// ```
/// use lingoscope_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 42, false);
/// assert_eq!(report.report_version, lingoscope_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Aggregate counters over all frames.
    pub summary: CaptureSummary,
    /// Per-frame results in arrival order.
    pub frames: Vec<FrameReport>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "lingoscope").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use lingoscope_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.bin".to_string(),
///     bytes: 1024,
///     obfuscated: true,
/// };
/// assert!(input.obfuscated);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Whether the stream was de-obfuscated before framing.
    pub obfuscated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub frames_total: u64,
    pub checksum_errors: u64,
    pub unrecognized: u64,
    /// Bytes left after the last complete frame, when the input ended
    /// mid-frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_bytes: Option<u64>,
}

/// One frame's report: raw bytes, checksum verdict and decoded text.
///
/// # Examples
/// ```
/// use lingoscope_core::FrameReport;
///
/// let report = FrameReport {
///     source: "0".to_string(),
///     offset_ms: None,
///     captured_at: None,
///     raw: vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe],
///     checksum_valid: true,
///     decoded: Some("Request identify".to_string()),
/// };
/// let json = serde_json::to_string(&report).unwrap();
/// assert!(json.contains("\"raw\":\"ff 55 02 00 00 fe\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Source label (by default the last character of the device path).
    pub source: String,
    /// Milliseconds since the first frame rendered by this process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_ms: Option<u64>,
    /// RFC3339 wall-clock time the frame completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    /// Frame bytes after de-obfuscation.
    #[serde(with = "hex_bytes")]
    pub raw: Vec<u8>,
    pub checksum_valid: bool,
    /// Decoded description; absent when the command is unrecognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded: Option<String>,
}

/// Build a report with base fields filled and no frames.
///
/// # Examples
/// ```
/// use lingoscope_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 123, true);
/// assert!(report.frames.is_empty());
/// assert!(report.input.obfuscated);
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64, obfuscated: bool) -> CaptureReport {
    CaptureReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "lingoscope".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
            obfuscated,
        },
        summary: CaptureSummary::default(),
        frames: vec![],
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let text = bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.split_whitespace()
            .map(|pair| u8::from_str_radix(pair, 16).map_err(D::Error::custom))
            .collect()
    }
}
