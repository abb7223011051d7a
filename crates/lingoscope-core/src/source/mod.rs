//! Byte sources feeding the frame assembler.
//!
//! The core never opens devices. Anything implementing [`std::io::Read`]
//! (serial ports, files, in-memory cursors) is a [`ByteSource`]; read
//! timeouts are retried so a quiet link simply blocks.

use std::io::{ErrorKind, Read};

use thiserror::Error;

pub trait ByteSource {
    /// Fill `buf` from the source, blocking until it is full or the source
    /// ends. Returns the number of bytes written, which is less than
    /// `buf.len()` only when the source reached end of stream.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<R: Read> ByteSource for R {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if matches!(err.kind(), ErrorKind::Interrupted | ErrorKind::TimedOut) => {
                    continue;
                }
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
        Ok(filled)
    }
}
