use std::fmt;

/// Rendering for a code missing from an enumeration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// `"<tag> (0x<code>)"`, code in unpadded lowercase hex.
    Tagged(&'static str),
    /// A fixed label for every unlisted code.
    Label(&'static str),
}

/// Ordered code-to-label mapping.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumTable {
    pub entries: &'static [(u8, &'static str)],
    pub fallback: Fallback,
}

impl EnumTable {
    pub fn label(&self, code: u8) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }

    pub fn field(&'static self, code: u8) -> DecodedField {
        DecodedField::Enumeration { code, table: self }
    }
}

/// One decoded argument of a command.
///
/// # Examples
/// ```
/// use lingoscope_core::protocols::common::field::DecodedField;
///
/// assert_eq!(DecodedField::Duration(30_000).to_string(), "0:30.000");
/// assert_eq!(DecodedField::Raw(vec![0x00, 0x1a]).to_string(), " 0x00 0x1a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedField {
    /// Millisecond count rendered `M:SS.mmm`.
    Duration(u32),
    /// Big-endian unsigned integer rendered in decimal.
    Integer(u32),
    /// Element index where all-ones means the start of the list.
    ElementIndex(u32),
    Text(String),
    Enumeration {
        code: u8,
        table: &'static EnumTable,
    },
    /// Raw bytes, each rendered as ` 0x..`.
    Raw(Vec<u8>),
}

pub const START_INDEX: u32 = 0xffff_ffff;

impl fmt::Display for DecodedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedField::Duration(ms) => {
                let minutes = ms / 60_000;
                let seconds = (ms / 1000) % 60;
                let millis = ms % 1000;
                write!(f, "{minutes}:{seconds:02}.{millis:03}")
            }
            DecodedField::Integer(value) => write!(f, "{value}"),
            DecodedField::ElementIndex(START_INDEX) => f.write_str("START"),
            DecodedField::ElementIndex(value) => write!(f, "{value}"),
            DecodedField::Text(text) => f.write_str(text),
            DecodedField::Enumeration { code, table } => match table.label(*code) {
                Some(label) => f.write_str(label),
                None => match table.fallback {
                    Fallback::Tagged(tag) => write!(f, "{tag} (0x{code:x})"),
                    Fallback::Label(label) => f.write_str(label),
                },
            },
            DecodedField::Raw(bytes) => {
                for byte in bytes {
                    write!(f, " 0x{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodedField, EnumTable, Fallback, START_INDEX};

    static MODES: EnumTable = EnumTable {
        entries: &[(0x00, "off"), (0x01, "song")],
        fallback: Fallback::Tagged("?"),
    };

    static STATUS: EnumTable = EnumTable {
        entries: &[(0x00, "Success")],
        fallback: Fallback::Label("ERROR"),
    };

    #[test]
    fn duration_formats_minutes_seconds_millis() {
        assert_eq!(DecodedField::Duration(0).to_string(), "0:00.000");
        assert_eq!(DecodedField::Duration(10_000).to_string(), "0:10.000");
        assert_eq!(DecodedField::Duration(754_321).to_string(), "12:34.321");
    }

    #[test]
    fn element_index_start_marker() {
        assert_eq!(DecodedField::ElementIndex(START_INDEX).to_string(), "START");
        assert_eq!(DecodedField::ElementIndex(42).to_string(), "42");
    }

    #[test]
    fn enumeration_uses_label_or_fallback() {
        assert_eq!(MODES.field(0x01).to_string(), "song");
        assert_eq!(MODES.field(0x1f).to_string(), "? (0x1f)");
        assert_eq!(STATUS.field(0x00).to_string(), "Success");
        assert_eq!(STATUS.field(0x04).to_string(), "ERROR");
    }

    #[test]
    fn raw_is_zero_padded_lowercase() {
        assert_eq!(DecodedField::Raw(vec![0x0a, 0xff]).to_string(), " 0x0a 0xff");
        assert_eq!(DecodedField::Raw(Vec::new()).to_string(), "");
    }
}
