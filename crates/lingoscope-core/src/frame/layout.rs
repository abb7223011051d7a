pub const SYNC: u8 = 0xff;
pub const LENGTH_ESCAPE: u8 = 0x00;

pub const SYNC_OFFSET: usize = 0;
pub const SELECTOR_OFFSET: usize = 1;
pub const LENGTH_OFFSET: usize = 2;
pub const EXT_LENGTH_RANGE: std::ops::Range<usize> = 3..5;

pub const HEADER_LEN: usize = 3;
pub const EXT_LENGTH_LEN: usize = EXT_LENGTH_RANGE.end - EXT_LENGTH_RANGE.start;
pub const EXT_HEADER_LEN: usize = HEADER_LEN + EXT_LENGTH_LEN;
pub const CHECKSUM_LEN: usize = 1;

/// Smallest byte span the dissector will look at.
pub const MIN_FRAME_LEN: usize = 5;

/// First byte covered by the running checksum; it extends to the end.
pub const CHECKSUM_START: usize = LENGTH_OFFSET;
