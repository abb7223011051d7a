//! Fixed-key byte obfuscation used by some accessory links.
//!
//! Every byte on an obfuscated link is XORed with [`KEY`]. The transform is
//! stateless and self-inverse, so the same functions encode and decode.

/// Key applied to every byte of an obfuscated stream.
pub const KEY: u8 = 0x31;

/// Transform a single byte.
///
/// # Examples
/// ```
/// use lingoscope_core::codec::transform_byte;
///
/// assert_eq!(transform_byte(0xff), 0xce);
/// assert_eq!(transform_byte(transform_byte(0x55)), 0x55);
/// ```
pub fn transform_byte(byte: u8) -> u8 {
    byte ^ KEY
}

/// Transform a byte slice, returning a new buffer.
///
/// # Examples
/// ```
/// use lingoscope_core::codec::transform;
///
/// let wire = transform(&[0xff, 0x55, 0x02]);
/// assert_eq!(wire, vec![0xce, 0x64, 0x33]);
/// assert_eq!(transform(&wire), vec![0xff, 0x55, 0x02]);
/// ```
pub fn transform(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().map(transform_byte).collect()
}

/// Transform a buffer in place.
pub fn transform_in_place(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        *byte = transform_byte(*byte);
    }
}
