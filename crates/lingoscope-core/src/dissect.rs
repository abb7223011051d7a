//! Frame dissection: selector -> lingo -> opcode -> argument layout.
//!
//! Dissection never fails. Frames that are too short, carry an unknown
//! selector, lingo or opcode, or whose arguments are shorter than the
//! catalogued layout all come back as [`Decoded::Unrecognized`], and the
//! caller falls back to a raw dump.

use log::debug;

use crate::frame::{self, Frame, layout};
use crate::protocols::common::error::DissectError;
use crate::protocols::{Lingo, TransportFamily, extended, general, vendor};

/// Outcome of dissecting one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Description(String),
    Unrecognized,
}

impl Decoded {
    pub fn description(&self) -> Option<&str> {
        match self {
            Decoded::Description(text) => Some(text.as_str()),
            Decoded::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Decoded::Description(_))
    }

    pub fn into_description(self) -> Option<String> {
        match self {
            Decoded::Description(text) => Some(text),
            Decoded::Unrecognized => None,
        }
    }
}

/// Decode a frame into a human-readable description.
///
/// # Examples
/// ```
/// use lingoscope_core::{Decoded, Frame, decode};
///
/// let frame = Frame::new(vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe]).unwrap();
/// assert_eq!(decode(&frame), Decoded::Description("Request identify".to_string()));
/// ```
pub fn decode(frame: &Frame) -> Decoded {
    decode_bytes(frame.bytes())
}

/// Decode raw frame bytes; no length validation is required.
pub fn decode_bytes(bytes: &[u8]) -> Decoded {
    match dissect(bytes) {
        Ok(Some(text)) => Decoded::Description(text),
        Ok(None) => Decoded::Unrecognized,
        Err(err) => {
            debug!("catalogued command with malformed arguments: {err}");
            Decoded::Unrecognized
        }
    }
}

fn dissect(bytes: &[u8]) -> Result<Option<String>, DissectError> {
    if bytes.len() < layout::MIN_FRAME_LEN || bytes[layout::SYNC_OFFSET] != layout::SYNC {
        return Ok(None);
    }
    let Some(&lingo) = bytes.get(frame::lingo_offset(bytes)) else {
        return Ok(None);
    };
    let region = frame::command_region(bytes);

    match TransportFamily::from_selector(bytes[layout::SELECTOR_OFFSET]) {
        Some(TransportFamily::GeneralExtended) => match Lingo::from_code(lingo) {
            Some(Lingo::General) => general::decode(region),
            Some(Lingo::ExtendedInterface) => extended::decode(region),
            None => Ok(None),
        },
        Some(TransportFamily::VendorControl) => {
            if lingo != vendor::LINGO {
                return Ok(None);
            }
            Ok(vendor::lookup(region).map(str::to_string))
        }
        None => Ok(None),
    }
}
