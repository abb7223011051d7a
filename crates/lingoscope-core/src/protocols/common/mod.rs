//! Building blocks shared by the opcode catalogs.
//!
//! - `reader`: cursor over a command region (big-endian integers, text)
//! - `field`: decoded values and their text rendering
//! - `rule`: tagged decode steps and catalog lookup

pub mod error;
pub mod field;
pub mod reader;
pub mod rule;
