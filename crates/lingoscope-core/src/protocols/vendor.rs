//! Vendor control sub-protocol (selector 0xA9).
//!
//! This traffic was identified by observation, not from documentation, so
//! commands are matched as exact byte sequences rather than decoded field
//! by field. Two handshake sequences are kept with placeholder labels
//! until their meaning is known.

/// Lingo byte every vendor control frame carries.
pub const LINGO: u8 = 0x00;

/// Observed command regions and their labels, in match order.
pub static SEQUENCES: &[(&[u8], &str)] = &[
    (&[0x03], "Denon periodic status query"),
    (&[0x81, 0x01, 0x01, 0x00, 0x00], "Denon status: no iPod"),
    (&[0x81, 0x01, 0x00, 0x00, 0x00], "Denon status: busy #1"),
    (&[0x81, 0x01, 0x01, 0x11, 0x00], "Denon status: busy #2"),
    (&[0x81, 0x00, 0x01, 0x11, 0x00], "Denon status: iPod ready"),
    (&[0x05], "Denon announcement: Deselecting iPod input"),
    (&[0x80, 0x00, 0x05], "ACK: Deselecting iPod input"),
    (&[0x01, 0x00], "Denon ??? #1"),
    (&[0x80, 0x00, 0x01], "ACK: ??? #1"),
];

/// Label for an exact command region, if it has been observed.
///
/// # Examples
/// ```
/// use lingoscope_core::protocols::vendor::lookup;
///
/// assert_eq!(lookup(&[0x03]), Some("Denon periodic status query"));
/// assert_eq!(lookup(&[0x03, 0x00]), None);
/// ```
pub fn lookup(region: &[u8]) -> Option<&'static str> {
    SEQUENCES
        .iter()
        .find(|(sequence, _)| *sequence == region)
        .map(|(_, label)| *label)
}
