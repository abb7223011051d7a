//! Extended Interface lingo (0x04): library navigation, playback status,
//! track metadata and playback control.
//!
//! Every command starts with a constant 0x00 byte before the real opcode.

use super::common::error::DissectError;
use super::common::field::{EnumTable, Fallback};
use super::common::reader::CommandReader;
use super::common::rule::{self, Command, Step};

pub const COMMAND_PREFIX: u8 = 0x00;

pub static RESULT: EnumTable = EnumTable {
    entries: &[(0x00, "success")],
    fallback: Fallback::Tagged("error"),
};

pub static ELEMENT: EnumTable = EnumTable {
    entries: &[
        (0x01, "Playlist"),
        (0x02, "Artist"),
        (0x03, "Album"),
        (0x04, "Genre"),
        (0x05, "Song"),
        (0x06, "Composer"),
    ],
    fallback: Fallback::Tagged("Unknown"),
};

pub static PLAY_STATE: EnumTable = EnumTable {
    entries: &[(0x00, "stopped"), (0x01, "playing"), (0x02, "paused")],
    fallback: Fallback::Tagged("?"),
};

pub static POLLING: EnumTable = EnumTable {
    entries: &[(0x01, "Start polling mode"), (0x00, "Stop polling mode")],
    fallback: Fallback::Tagged("Polling mode: ?"),
};

pub static PLAYBACK: EnumTable = EnumTable {
    entries: &[
        (0x01, "Play/Pause"),
        (0x02, "Stop"),
        (0x03, "Skip++"),
        (0x04, "Skip--"),
        (0x05, "FFwd"),
        (0x06, "FRwnd"),
        (0x07, "Stop FFwd/FRwnd"),
    ],
    fallback: Fallback::Tagged("?"),
};

pub static SHUFFLE: EnumTable = EnumTable {
    entries: &[(0x00, "off"), (0x01, "song"), (0x02, "album")],
    fallback: Fallback::Tagged("?"),
};

pub static REPEAT: EnumTable = EnumTable {
    entries: &[(0x00, "off"), (0x01, "one song"), (0x02, "all songs")],
    fallback: Fallback::Tagged("?"),
};

pub static COMMANDS: &[Command] = &[
    Command {
        opcode: 0x01,
        steps: &[Step::Literal("Result: "), Step::Enum(&RESULT)],
    },
    Command {
        opcode: 0x12,
        steps: &[Step::Literal("Request iPod type")],
    },
    Command {
        opcode: 0x13,
        steps: &[Step::Literal("iPod type:"), Step::Raw],
    },
    Command {
        opcode: 0x16,
        steps: &[Step::Literal("Switch to the main library playlist")],
    },
    Command {
        opcode: 0x17,
        steps: &[
            Step::Literal("Switch to "),
            Step::Enum(&ELEMENT),
            Step::Literal(" "),
            Step::Number(4),
        ],
    },
    Command {
        opcode: 0x18,
        steps: &[
            Step::Literal("Request count for element "),
            Step::Enum(&ELEMENT),
        ],
    },
    Command {
        opcode: 0x19,
        steps: &[Step::Literal("Count: "), Step::Number(4)],
    },
    Command {
        opcode: 0x1a,
        steps: &[
            Step::Literal("Request names for element "),
            Step::Enum(&ELEMENT),
            Step::Literal("; starting at: "),
            Step::Number(4),
            Step::Literal("; count: "),
            Step::Number(4),
        ],
    },
    Command {
        opcode: 0x1b,
        steps: &[
            Step::Literal("Name for element "),
            Step::Number(4),
            Step::Literal(": "),
            Step::Text,
        ],
    },
    Command {
        opcode: 0x1c,
        steps: &[Step::Literal("Request time and status info")],
    },
    Command {
        opcode: 0x1d,
        steps: &[
            Step::Literal("Track length: "),
            Step::Duration,
            Step::Literal("; current time: "),
            Step::Duration,
            Step::Literal("; status: "),
            Step::Enum(&PLAY_STATE),
        ],
    },
    Command {
        opcode: 0x1e,
        steps: &[Step::Literal("Request current position in playlist")],
    },
    Command {
        opcode: 0x1f,
        steps: &[
            Step::Literal("Current position in playlist: "),
            Step::Number(4),
        ],
    },
    Command {
        opcode: 0x20,
        steps: &[Step::Literal("Request title of song "), Step::Number(4)],
    },
    Command {
        opcode: 0x21,
        steps: &[Step::Literal("Title of song: "), Step::Text],
    },
    Command {
        opcode: 0x22,
        steps: &[Step::Literal("Request artist of song "), Step::Number(4)],
    },
    Command {
        opcode: 0x23,
        steps: &[Step::Literal("Artist of song: "), Step::Text],
    },
    Command {
        opcode: 0x24,
        steps: &[Step::Literal("Request album of song "), Step::Number(4)],
    },
    Command {
        opcode: 0x25,
        steps: &[Step::Literal("Album of song: "), Step::Text],
    },
    Command {
        opcode: 0x26,
        steps: &[Step::Enum(&POLLING)],
    },
    // The byte ahead of the elapsed time has not been identified.
    Command {
        opcode: 0x27,
        steps: &[Step::Literal("Time elapsed: "), Step::Skip(1), Step::Duration],
    },
    Command {
        opcode: 0x28,
        steps: &[Step::Literal("Switch to element "), Step::ElementIndex],
    },
    Command {
        opcode: 0x29,
        steps: &[Step::Literal("Playback control: "), Step::Enum(&PLAYBACK)],
    },
    Command {
        opcode: 0x2c,
        steps: &[Step::Literal("Get shuffle mode")],
    },
    Command {
        opcode: 0x2d,
        steps: &[Step::Literal("Shuffle mode: "), Step::Enum(&SHUFFLE)],
    },
    Command {
        opcode: 0x2e,
        steps: &[Step::Literal("Set shuffle mode: "), Step::Enum(&SHUFFLE)],
    },
    Command {
        opcode: 0x2f,
        steps: &[Step::Literal("Get repeat mode")],
    },
    Command {
        opcode: 0x30,
        steps: &[Step::Literal("Repeat mode: "), Step::Enum(&REPEAT)],
    },
    Command {
        opcode: 0x31,
        steps: &[Step::Literal("Set repeat mode: "), Step::Enum(&REPEAT)],
    },
    Command {
        opcode: 0x32,
        steps: &[Step::Literal("Picture block")],
    },
    Command {
        opcode: 0x33,
        steps: &[Step::Literal("Request screen resolution")],
    },
    Command {
        opcode: 0x34,
        steps: &[
            Step::Literal("Screen resolution: "),
            Step::Number(2),
            Step::Literal("x"),
            Step::Number(2),
            Step::Literal("x"),
            Step::Number(1),
        ],
    },
];

/// Decode an Extended Interface command region (prefix, opcode, args).
pub fn decode(region: &[u8]) -> Result<Option<String>, DissectError> {
    let mut reader = CommandReader::new(region);
    if reader.read_u8()? != COMMAND_PREFIX {
        return Ok(None);
    }
    let opcode = reader.read_u8()?;
    rule::describe(COMMANDS, opcode, reader.rest())
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, decode};

    fn text(region: &[u8]) -> Option<String> {
        decode(region).unwrap()
    }

    #[test]
    fn switch_to_element_start_marker() {
        let desc = text(&[0x00, 0x28, 0xff, 0xff, 0xff, 0xff]).unwrap();
        assert_eq!(desc, "Switch to element START");
    }

    #[test]
    fn switch_to_element_index() {
        let desc = text(&[0x00, 0x28, 0x00, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(desc, "Switch to element 256");
    }

    #[test]
    fn time_and_status() {
        let desc = text(&[
            0x00, 0x1d, 0x00, 0x00, 0x75, 0x30, 0x00, 0x00, 0x27, 0x10, 0x01,
        ])
        .unwrap();
        assert_eq!(
            desc,
            "Track length: 0:30.000; current time: 0:10.000; status: playing"
        );
    }

    #[test]
    fn time_and_status_unknown_state() {
        let desc = text(&[
            0x00, 0x1d, 0x00, 0x03, 0x0d, 0x40, 0x00, 0x00, 0x00, 0x00, 0x09,
        ])
        .unwrap();
        assert_eq!(
            desc,
            "Track length: 3:20.000; current time: 0:00.000; status: ? (0x9)"
        );
    }

    #[test]
    fn set_shuffle_mode() {
        assert_eq!(
            text(&[0x00, 0x2e, 0x02]).as_deref(),
            Some("Set shuffle mode: album")
        );
        assert_eq!(
            text(&[0x00, 0x2e, 0x05]).as_deref(),
            Some("Set shuffle mode: ? (0x5)")
        );
    }

    #[test]
    fn repeat_mode_response() {
        assert_eq!(
            text(&[0x00, 0x30, 0x02]).as_deref(),
            Some("Repeat mode: all songs")
        );
    }

    #[test]
    fn request_names_for_element() {
        let desc = text(&[
            0x00, 0x1a, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0a,
        ])
        .unwrap();
        assert_eq!(
            desc,
            "Request names for element Playlist; starting at: 0; count: 10"
        );
    }

    #[test]
    fn switch_to_unknown_category() {
        let desc = text(&[0x00, 0x17, 0x07, 0x00, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(desc, "Switch to Unknown (0x7) 2");
    }

    #[test]
    fn song_metadata() {
        assert_eq!(
            text(&[0x00, 0x20, 0x00, 0x00, 0x00, 0x03]).as_deref(),
            Some("Request title of song 3")
        );
        assert_eq!(
            text(b"\x00\x23Nina Simone\0").as_deref(),
            Some("Artist of song: Nina Simone")
        );
    }

    #[test]
    fn polling_mode() {
        assert_eq!(text(&[0x00, 0x26, 0x01]).as_deref(), Some("Start polling mode"));
        assert_eq!(text(&[0x00, 0x26, 0x00]).as_deref(), Some("Stop polling mode"));
        assert_eq!(
            text(&[0x00, 0x26, 0x02]).as_deref(),
            Some("Polling mode: ? (0x2)")
        );
    }

    #[test]
    fn time_elapsed_skips_leading_byte() {
        let desc = text(&[0x00, 0x27, 0x04, 0x00, 0x01, 0x0f, 0x2c]).unwrap();
        assert_eq!(desc, "Time elapsed: 1:09.420");
    }

    #[test]
    fn playback_control() {
        assert_eq!(
            text(&[0x00, 0x29, 0x07]).as_deref(),
            Some("Playback control: Stop FFwd/FRwnd")
        );
    }

    #[test]
    fn result_error_code() {
        assert_eq!(text(&[0x00, 0x01, 0x00]).as_deref(), Some("Result: success"));
        assert_eq!(
            text(&[0x00, 0x01, 0x05]).as_deref(),
            Some("Result: error (0x5)")
        );
    }

    #[test]
    fn screen_resolution() {
        assert_eq!(
            text(&[0x00, 0x34, 0x01, 0x40, 0x00, 0xf0, 0x02]).as_deref(),
            Some("Screen resolution: 320x240x2")
        );
    }

    #[test]
    fn missing_prefix_is_unrecognized() {
        assert_eq!(text(&[0x01, 0x1c]), None);
    }

    #[test]
    fn unknown_opcode_is_unrecognized() {
        assert_eq!(text(&[0x00, 0x2a]), None);
    }

    #[test]
    fn truncated_arguments_are_an_error() {
        assert!(decode(&[0x00, 0x1d, 0x00, 0x00]).is_err());
        assert!(decode(&[0x00]).is_err());
    }

    #[test]
    fn catalog_opcodes_are_unique() {
        let mut opcodes: Vec<u8> = COMMANDS.iter().map(|command| command.opcode).collect();
        opcodes.sort_unstable();
        opcodes.dedup();
        assert_eq!(opcodes.len(), COMMANDS.len());
    }
}
