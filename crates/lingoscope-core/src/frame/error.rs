use thiserror::Error;

use crate::source::SourceError;

/// Errors raised while assembling or validating frames.
///
/// Note: checksum mismatches are not errors; they are reported alongside
/// the decoded text.
///
/// # Examples
/// ```
/// use lingoscope_core::FrameError;
///
/// let err = FrameError::Truncated { needed: 9, actual: 4 };
/// assert!(err.to_string().contains("stream ended mid-frame"));
/// ```
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("frame length mismatch: header declares {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("stream ended mid-frame: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}
