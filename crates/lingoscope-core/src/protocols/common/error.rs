use thiserror::Error;

/// Errors raised while reading command arguments.
///
/// Note: this error type lives in an internal module; the dissector turns
/// it into an unrecognized result.
///
/// # Examples
/// ```text
/// use lingoscope_core::protocols::common::error::DissectError;
///
/// let err = DissectError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("arguments too short"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DissectError {
    #[error("arguments too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported integer width: {width}")]
    InvalidWidth { width: usize },
}
