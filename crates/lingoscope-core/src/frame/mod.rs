//! Frame model, assembly and checksum validation.
//!
//! Wire layout:
//!
//! ```text
//! SYNC(0xFF) SELECTOR LEN [EXT_LEN(2, BE) if LEN == 0x00] LINGO PAYLOAD.. CHECKSUM
//! ```
//!
//! LEN counts the lingo byte and payload; the checksum byte follows it.
//! A zero LEN escapes to a 16-bit big-endian length, which shifts every
//! later field by two bytes. Offsets live in `layout`, stream handling in
//! `assembler`, and the running sum in `checksum`.

pub mod assembler;
pub mod checksum;
pub mod error;
pub mod layout;

pub use assembler::FrameAssembler;
pub use error::FrameError;

/// One complete protocol message, already de-obfuscated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Build a frame from bytes, checking the minimum size and that the
    /// total length matches the length field(s).
    ///
    /// # Examples
    /// ```
    /// use lingoscope_core::Frame;
    ///
    /// let frame = Frame::new(vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe]).unwrap();
    /// assert_eq!(frame.declared_length(), Some(2));
    /// assert!(Frame::new(vec![0xff, 0x55, 0x02]).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns `FrameError::TooShort` below the minimum frame size, and
    /// `FrameError::LengthMismatch` when the byte count disagrees with the
    /// declared length.
    pub fn new(bytes: Vec<u8>) -> Result<Self, FrameError> {
        if bytes.len() < layout::MIN_FRAME_LEN {
            return Err(FrameError::TooShort {
                needed: layout::MIN_FRAME_LEN,
                actual: bytes.len(),
            });
        }
        let frame = Self { bytes };
        let expected = frame.expected_len().ok_or(FrameError::TooShort {
            needed: layout::EXT_HEADER_LEN,
            actual: frame.bytes.len(),
        })?;
        if expected != frame.bytes.len() {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: frame.bytes.len(),
            });
        }
        Ok(frame)
    }

    pub(crate) fn from_assembled(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn sync(&self) -> Option<u8> {
        self.bytes.get(layout::SYNC_OFFSET).copied()
    }

    pub fn selector(&self) -> Option<u8> {
        self.bytes.get(layout::SELECTOR_OFFSET).copied()
    }

    /// True when the length byte is the escape to a 16-bit length.
    pub fn is_extended(&self) -> bool {
        is_extended(&self.bytes)
    }

    /// Length of lingo + payload as declared by the length field(s).
    pub fn declared_length(&self) -> Option<u16> {
        if self.is_extended() {
            let bytes = self.bytes.get(layout::EXT_LENGTH_RANGE)?;
            Some(u16::from_be_bytes([bytes[0], bytes[1]]))
        } else {
            self.bytes
                .get(layout::LENGTH_OFFSET)
                .map(|&len| u16::from(len))
        }
    }

    pub fn lingo_offset(&self) -> usize {
        lingo_offset(&self.bytes)
    }

    pub fn lingo(&self) -> Option<u8> {
        self.bytes.get(self.lingo_offset()).copied()
    }

    /// Bytes between the lingo byte and the checksum byte.
    pub fn command_region(&self) -> &[u8] {
        command_region(&self.bytes)
    }

    pub fn checksum_byte(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    fn expected_len(&self) -> Option<usize> {
        let header = if self.is_extended() {
            layout::EXT_HEADER_LEN
        } else {
            layout::HEADER_LEN
        };
        let declared = usize::from(self.declared_length()?);
        Some(header + declared + layout::CHECKSUM_LEN)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

pub(crate) fn is_extended(bytes: &[u8]) -> bool {
    bytes.get(layout::LENGTH_OFFSET) == Some(&layout::LENGTH_ESCAPE)
}

pub(crate) fn lingo_offset(bytes: &[u8]) -> usize {
    if is_extended(bytes) {
        layout::EXT_HEADER_LEN
    } else {
        layout::HEADER_LEN
    }
}

pub(crate) fn command_region(bytes: &[u8]) -> &[u8] {
    let start = lingo_offset(bytes) + 1;
    let end = bytes.len().saturating_sub(layout::CHECKSUM_LEN);
    bytes.get(start..end).unwrap_or(&[])
}
