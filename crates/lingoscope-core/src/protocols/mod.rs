//! Command catalogs for each transport family and lingo.
//!
//! Each catalog is an ordered table mapping an opcode to the tagged steps
//! that describe its arguments (`common::rule`). The vendor control
//! catalog is different: it maps whole observed byte sequences to labels.
//!
//! Catalogs are pure and contain no I/O; the `dissect` module picks the
//! catalog from the frame header.

pub mod common;
pub mod extended;
pub mod general;
pub mod vendor;

/// Transport family, chosen by the selector byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFamily {
    GeneralExtended,
    VendorControl,
}

impl TransportFamily {
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0x55 => Some(Self::GeneralExtended),
            0xa9 => Some(Self::VendorControl),
            _ => None,
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            Self::GeneralExtended => 0x55,
            Self::VendorControl => 0xa9,
        }
    }
}

/// Sub-protocol under the General/Extended family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lingo {
    General,
    ExtendedInterface,
}

impl Lingo {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::General),
            0x04 => Some(Self::ExtendedInterface),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::General => 0x00,
            Self::ExtendedInterface => 0x04,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lingo, TransportFamily};

    #[test]
    fn selectors_round_trip() {
        for family in [TransportFamily::GeneralExtended, TransportFamily::VendorControl] {
            assert_eq!(TransportFamily::from_selector(family.selector()), Some(family));
        }
        assert_eq!(TransportFamily::from_selector(0x00), None);
    }

    #[test]
    fn lingo_codes() {
        assert_eq!(Lingo::from_code(0x04), Some(Lingo::ExtendedInterface));
        assert_eq!(Lingo::from_code(0x02), None);
        assert_eq!(Lingo::General.code(), 0x00);
    }
}
