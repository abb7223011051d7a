use super::{Frame, layout};

/// 8-bit running sum over the length field through the checksum byte.
///
/// # Examples
/// ```
/// use lingoscope_core::Frame;
/// use lingoscope_core::frame::checksum;
///
/// let frame = Frame::new(vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe]).unwrap();
/// assert_eq!(checksum::sum(&frame), 0);
/// assert!(checksum::is_valid(&frame));
/// ```
pub fn sum(frame: &Frame) -> u8 {
    sum_bytes(frame.bytes())
}

/// A frame is valid when its running sum is zero.
pub fn is_valid(frame: &Frame) -> bool {
    sum(frame) == 0
}

/// Running sum of raw frame bytes; sync and selector are skipped.
pub fn sum_bytes(bytes: &[u8]) -> u8 {
    bytes
        .get(layout::CHECKSUM_START..)
        .unwrap_or(&[])
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}

/// Checksum byte that completes `covered` (length field through payload).
///
/// # Examples
/// ```
/// use lingoscope_core::frame::checksum::complement;
///
/// assert_eq!(complement(&[0x02, 0x00, 0x00]), 0xfe);
/// ```
pub fn complement(covered: &[u8]) -> u8 {
    let total = covered
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
    0u8.wrapping_sub(total)
}
