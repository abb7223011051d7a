//! General lingo (0x00): identification, acknowledgements, remote UI mode
//! and device information requests.

use super::common::error::DissectError;
use super::common::field::{EnumTable, Fallback};
use super::common::reader::CommandReader;
use super::common::rule::{self, Command, Step};

pub static ACK_STATUS: EnumTable = EnumTable {
    entries: &[(0x00, "Success")],
    fallback: Fallback::Label("ERROR"),
};

pub static UI_MODE: EnumTable = EnumTable {
    entries: &[(0x00, "Standard UI Mode")],
    fallback: Fallback::Label("Extended Interface Mode"),
};

pub static COMMANDS: &[Command] = &[
    Command {
        opcode: 0x00,
        steps: &[Step::Literal("Request identify")],
    },
    Command {
        opcode: 0x01,
        steps: &[Step::Literal("Identify:"), Step::Raw],
    },
    Command {
        opcode: 0x02,
        steps: &[
            Step::Literal("ACK: "),
            Step::PeekEnum(&ACK_STATUS),
            Step::Raw,
        ],
    },
    Command {
        opcode: 0x03,
        steps: &[Step::Literal("Request Remote UI Mode")],
    },
    Command {
        opcode: 0x04,
        steps: &[Step::Literal("Return Remote UI Mode: "), Step::Enum(&UI_MODE)],
    },
    Command {
        opcode: 0x05,
        steps: &[Step::Literal("Enter Remote UI Mode")],
    },
    Command {
        opcode: 0x06,
        steps: &[Step::Literal("Exit Remote UI Mode")],
    },
    Command {
        opcode: 0x09,
        steps: &[Step::Literal("Request iPod Software Version")],
    },
    Command {
        opcode: 0x0a,
        steps: &[Step::Literal("iPod Software Version:"), Step::Raw],
    },
    Command {
        opcode: 0x0b,
        steps: &[Step::Literal("Request iPod Serial Number")],
    },
    Command {
        opcode: 0x0c,
        steps: &[Step::Literal("iPod Serial Number: "), Step::Text],
    },
    Command {
        opcode: 0x0d,
        steps: &[Step::Literal("Request iPod Model Number")],
    },
    Command {
        opcode: 0x0e,
        steps: &[Step::Literal("iPod Model Number:"), Step::Raw],
    },
    Command {
        opcode: 0x0f,
        steps: &[Step::Literal("Request Lingo Protocol Version"), Step::Raw],
    },
    Command {
        opcode: 0x10,
        steps: &[Step::Literal("Lingo Protocol Version:"), Step::Raw],
    },
];

/// Decode a General lingo command region (opcode first).
pub fn decode(region: &[u8]) -> Result<Option<String>, DissectError> {
    let mut reader = CommandReader::new(region);
    let opcode = reader.read_u8()?;
    rule::describe(COMMANDS, opcode, reader.rest())
}
