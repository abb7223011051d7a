use log::{debug, trace};

use crate::codec;
use crate::source::ByteSource;

use super::error::FrameError;
use super::{Frame, layout};

/// Reads complete frames from a blocking byte source.
///
/// When the source is obfuscated, the length bytes are decoded on the fly
/// to size the following reads and the whole buffer is decoded once the
/// frame is complete.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use lingoscope_core::FrameAssembler;
///
/// let wire = vec![0xff, 0x55, 0x02, 0x00, 0x00, 0xfe];
/// let mut assembler = FrameAssembler::new(Cursor::new(wire), false);
/// let frame = assembler.next_frame()?.expect("one frame");
/// assert_eq!(frame.len(), 6);
/// assert!(assembler.next_frame()?.is_none());
/// # Ok::<(), lingoscope_core::FrameError>(())
/// ```
pub struct FrameAssembler<S> {
    source: S,
    obfuscated: bool,
}

impl<S: ByteSource> FrameAssembler<S> {
    pub fn new(source: S, obfuscated: bool) -> Self {
        Self { source, obfuscated }
    }

    pub fn obfuscated(&self) -> bool {
        self.obfuscated
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Block until one complete frame has been read.
    ///
    /// Returns `Ok(None)` when the source ends cleanly between frames.
    ///
    /// # Errors
    /// Returns `FrameError::Truncated` when the source ends inside a frame
    /// and `FrameError::Source` when the source fails.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        let mut buf = vec![0u8; layout::HEADER_LEN];
        let read = self.source.fill(&mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        if read < layout::HEADER_LEN {
            return Err(FrameError::Truncated {
                needed: layout::HEADER_LEN,
                actual: read,
            });
        }

        let mut length = usize::from(self.plain(buf[layout::LENGTH_OFFSET]));
        if length == usize::from(layout::LENGTH_ESCAPE) {
            self.read_more(&mut buf, layout::EXT_LENGTH_LEN)?;
            let hi = self.plain(buf[layout::EXT_LENGTH_RANGE.start]);
            let lo = self.plain(buf[layout::EXT_LENGTH_RANGE.start + 1]);
            length = usize::from(u16::from_be_bytes([hi, lo]));
            trace!("extended length escape: {length} bytes");
        }

        self.read_more(&mut buf, length + layout::CHECKSUM_LEN)?;
        if self.obfuscated {
            codec::transform_in_place(&mut buf);
        }

        debug!(
            "assembled frame: {} bytes (selector {:#04x})",
            buf.len(),
            buf[layout::SELECTOR_OFFSET]
        );
        Ok(Some(Frame::from_assembled(buf)))
    }

    fn plain(&self, byte: u8) -> u8 {
        if self.obfuscated {
            codec::transform_byte(byte)
        } else {
            byte
        }
    }

    fn read_more(&mut self, buf: &mut Vec<u8>, count: usize) -> Result<(), FrameError> {
        let start = buf.len();
        buf.resize(start + count, 0);
        let read = self.source.fill(&mut buf[start..])?;
        if read < count {
            return Err(FrameError::Truncated {
                needed: start + count,
                actual: start + read,
            });
        }
        Ok(())
    }
}
