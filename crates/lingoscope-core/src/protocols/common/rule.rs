use std::fmt::Write;

use super::error::DissectError;
use super::field::{DecodedField, EnumTable};
use super::reader::CommandReader;

/// One step of a command's argument layout.
///
/// A command's description is the concatenation of its steps, applied in
/// order to the bytes following the opcode.
#[derive(Debug)]
pub enum Step {
    Literal(&'static str),
    /// Big-endian unsigned integer of the given width.
    Number(usize),
    /// 4-byte millisecond count.
    Duration,
    /// 4-byte element index with the all-ones start marker.
    ElementIndex,
    Text,
    Enum(&'static EnumTable),
    /// Enumeration read without consuming the byte.
    PeekEnum(&'static EnumTable),
    /// Every remaining byte as a raw dump.
    Raw,
    Skip(usize),
}

impl Step {
    /// Decode the field for this step, or `None` for steps that produce
    /// no value.
    pub fn read(
        &self,
        reader: &mut CommandReader<'_>,
    ) -> Result<Option<DecodedField>, DissectError> {
        let field = match self {
            Step::Literal(_) => return Ok(None),
            Step::Skip(len) => {
                reader.skip(*len)?;
                return Ok(None);
            }
            Step::Number(width) => DecodedField::Integer(reader.read_be(*width)?),
            Step::Duration => DecodedField::Duration(reader.read_u32_be()?),
            Step::ElementIndex => DecodedField::ElementIndex(reader.read_u32_be()?),
            Step::Text => DecodedField::Text(reader.read_text()),
            Step::Enum(table) => table.field(reader.read_u8()?),
            Step::PeekEnum(table) => table.field(reader.peek_u8()?),
            Step::Raw => DecodedField::Raw(reader.take_rest().to_vec()),
        };
        Ok(Some(field))
    }
}

/// Catalog entry: an opcode and the layout of its arguments.
#[derive(Debug)]
pub struct Command {
    pub opcode: u8,
    pub steps: &'static [Step],
}

impl Command {
    /// Decoded argument values, in layout order.
    pub fn fields(&self, args: &[u8]) -> Result<Vec<DecodedField>, DissectError> {
        let mut reader = CommandReader::new(args);
        let mut fields = Vec::new();
        for step in self.steps {
            if let Some(field) = step.read(&mut reader)? {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    /// Render the full description for the given argument bytes.
    pub fn describe(&self, args: &[u8]) -> Result<String, DissectError> {
        let mut reader = CommandReader::new(args);
        let mut out = String::new();
        for step in self.steps {
            if let Step::Literal(text) = step {
                out.push_str(text);
                continue;
            }
            if let Some(field) = step.read(&mut reader)? {
                let _ = write!(out, "{field}");
            }
        }
        Ok(out)
    }
}

/// Find the catalog entry for an opcode.
pub fn lookup(catalog: &'static [Command], opcode: u8) -> Option<&'static Command> {
    catalog.iter().find(|command| command.opcode == opcode)
}

/// Decode `opcode` + `args` against a catalog. Unknown opcodes yield `None`.
pub fn describe(
    catalog: &'static [Command],
    opcode: u8,
    args: &[u8],
) -> Result<Option<String>, DissectError> {
    match lookup(catalog, opcode) {
        Some(command) => command.describe(args).map(Some),
        None => Ok(None),
    }
}
