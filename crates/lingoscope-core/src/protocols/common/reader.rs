use super::error::DissectError;

/// Sequential reader over the argument bytes of one command.
pub struct CommandReader<'a> {
    payload: &'a [u8],
    position: usize,
}

impl<'a> CommandReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            position: 0,
        }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DissectError> {
        let available = self.payload.len() - self.position;
        if available < needed {
            return Err(DissectError::TooShort {
                needed: self.position + needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn peek_u8(&self) -> Result<u8, DissectError> {
        self.payload
            .get(self.position)
            .copied()
            .ok_or(DissectError::TooShort {
                needed: self.position + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u8(&mut self) -> Result<u8, DissectError> {
        let value = self.peek_u8()?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DissectError> {
        self.require_len(len)?;
        let bytes = &self.payload[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Big-endian unsigned integer of 1, 2 or 4 bytes.
    pub fn read_be(&mut self, width: usize) -> Result<u32, DissectError> {
        if !matches!(width, 1 | 2 | 4) {
            return Err(DissectError::InvalidWidth { width });
        }
        let bytes = self.read_slice(width)?;
        Ok(bytes
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte)))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DissectError> {
        self.read_be(4)
    }

    /// NUL-terminated text; the terminator is consumed. Without a
    /// terminator the rest of the region is taken.
    pub fn read_text(&mut self) -> String {
        let rest = self.rest();
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        let text = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.position = (self.position + end + 1).min(self.payload.len());
        text
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DissectError> {
        self.read_slice(len).map(|_| ())
    }

    /// Remaining bytes without consuming them.
    pub fn rest(&self) -> &'a [u8] {
        &self.payload[self.position..]
    }

    /// Consume and return everything that is left.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = self.rest();
        self.position = self.payload.len();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::CommandReader;
    use crate::protocols::common::error::DissectError;

    #[test]
    fn reads_big_endian_widths() {
        let mut reader = CommandReader::new(&[0x01, 0x02, 0x03, 0x00, 0x00, 0x75, 0x30]);
        assert_eq!(reader.read_be(1).unwrap(), 1);
        assert_eq!(reader.read_be(2).unwrap(), 0x0203);
        assert_eq!(reader.read_be(4).unwrap(), 30_000);
        assert!(reader.rest().is_empty());
    }

    #[test]
    fn short_read_reports_needed_bytes() {
        let mut reader = CommandReader::new(&[0x01, 0x02]);
        reader.read_u8().unwrap();
        let err = reader.read_u32_be().unwrap_err();
        assert_eq!(
            err,
            DissectError::TooShort {
                needed: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_odd_widths() {
        let mut reader = CommandReader::new(&[0; 8]);
        assert_eq!(
            reader.read_be(3).unwrap_err(),
            DissectError::InvalidWidth { width: 3 }
        );
    }

    #[test]
    fn text_stops_at_nul() {
        let mut reader = CommandReader::new(b"Abbey Road\0\x07");
        assert_eq!(reader.read_text(), "Abbey Road");
        assert_eq!(reader.rest(), &[0x07]);
    }

    #[test]
    fn text_without_nul_takes_rest() {
        let mut reader = CommandReader::new(b"8A123");
        assert_eq!(reader.read_text(), "8A123");
        assert!(reader.rest().is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = CommandReader::new(&[0x00, 0x04]);
        assert_eq!(reader.peek_u8().unwrap(), 0x00);
        assert_eq!(reader.take_rest(), &[0x00, 0x04]);
        assert!(reader.peek_u8().is_err());
    }
}
