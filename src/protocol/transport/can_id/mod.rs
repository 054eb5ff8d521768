//! Creation and extraction of the 29-bit CAN identifiers used by
//! NMEA 2000 (derived from the SAE J1939 specification).
//!
//! ```text
//! bits 28-26  priority
//! bit  25     reserved
//! bit  24     data page
//! bits 23-16  PDU format (PF)
//! bits 15-8   PDU specific (PS): PGN low byte, or destination when addressed
//! bits 7-0    source address
//! ```
//!
//! Every input is masked to its bit width: building an identifier never fails.
use crate::core::{BROADCAST_ADDRESS, DEFAULT_PRIORITY};

const ID_MASK: u32 = 0x1FFF_FFFF;
const PGN_MASK: u32 = 0x3_FFFF;
const PS_MASK: u32 = 0xFF << 8;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates an extended CAN identifier (29 bits) and exposes accessors
/// for priority, PGN, destination, and source.
pub struct CanId(u32);

impl CanId {
    /// Wrap a raw identifier, dropping anything above bit 28.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & ID_MASK)
    }

    /// Raw 29-bit value.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Creates a pre-configured `CanIdBuilder` for a PGN and source address.
    pub fn builder(pgn: u32, source_address: u8) -> CanIdBuilder {
        CanIdBuilder::new(pgn, source_address)
    }

    /// Returns the priority (3 bits, value 0-7) encoded in the CAN ID.
    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    /// Extracts the 18-bit PGN, handling the PDU1/PDU2 distinction.
    pub fn pgn(&self) -> u32 {
        let ps = (self.0 >> 8) & 0xFF;
        let pf = self.pdu_format();
        let r_dp = (self.0 >> 24) & 0x03;

        if self.is_pdu2() {
            // PDU2: PS is the group extension and belongs to the PGN.
            (r_dp << 16) | ((pf as u32) << 8) | ps
        } else {
            // PDU1: PS stores the destination, the PGN low byte is implicitly zero.
            (r_dp << 16) | ((pf as u32) << 8)
        }
    }

    /// Returns the destination address (PDU1) when the PGN carries one.
    pub fn destination(&self) -> Option<u8> {
        if self.is_pdu2() {
            None
        } else {
            Some(((self.0 >> 8) & 0xFF) as u8)
        }
    }

    /// Eight-bit source address (logical node identifier on the N2K network).
    pub fn source_address(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Splits the identifier back into the fields used to build it.
    pub fn decompose(&self) -> IdentifierParts {
        IdentifierParts {
            priority: self.priority(),
            pgn: self.pgn(),
            source: self.source_address(),
        }
    }

    fn pdu_format(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    fn is_pdu2(&self) -> bool {
        self.pdu_format() >= 240
    }
}

impl From<CanId> for u32 {
    fn from(id: CanId) -> Self {
        id.0
    }
}

/// Fields recovered from an identifier by [`CanId::decompose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdentifierParts {
    pub priority: u8,
    pub pgn: u32,
    pub source: u8,
}

//==================================================================================CAN_ID_BUILDER
#[derive(Debug, Clone, Copy)]
/// Fluent builder for [`CanId`].
pub struct CanIdBuilder {
    pub priority: u8,
    pub pgn: u32,
    pub source_address: u8,
    pub destination: Option<u8>,
}

impl CanIdBuilder {
    /// Initializes the builder for a given PGN and source address.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            pgn,
            source_address,
            destination: None,
        }
    }

    /// Sets the priority (3 bits) to use during construction.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Assigns a destination address. `255` keeps the message broadcast.
    pub fn to_destination(mut self, destination_address: u8) -> Self {
        self.destination = Some(destination_address);
        self
    }

    /// Packs the identifier.
    ///
    /// The PGN is masked to 18 bits and copied into R/DP/PF/PS. A destination
    /// other than broadcast then replaces the PS byte; a broadcast destination
    /// leaves the PGN low byte untouched.
    pub fn build(self) -> CanId {
        let mut id = (((self.priority & 0x07) as u32) << 26)
            | ((self.pgn & PGN_MASK) << 8)
            | (self.source_address as u32);

        if let Some(da) = self.destination.filter(|da| *da != BROADCAST_ADDRESS) {
            id = (id & !PS_MASK) | ((da as u32) << 8);
        }
        CanId::from_raw(id)
    }
}

/// Packs a PGN, source, destination and priority into a 29-bit identifier.
pub fn build_identifier(pgn: u32, source: u8, destination: u8, priority: u8) -> CanId {
    CanId::builder(pgn, source)
        .with_priority(priority)
        .to_destination(destination)
        .build()
}

/// Inverse of [`build_identifier`] for the priority, PGN and source fields.
pub fn decompose_identifier(id: CanId) -> IdentifierParts {
    id.decompose()
}
