//! Proprietary header shared by every Poco payload, and the validator used
//! to demultiplex Poco traffic from the rest of the bus.
//!
//! # Layout (little-endian word, then one byte)
//!
//! ```text
//! word bits  0-10  (11 bits) : manufacturer code (1512)
//! word bits 11-12  ( 2 bits) : reserved, written as zero
//! word bits 13-15  ( 3 bits) : industry code (4, marine)
//! byte 2                     : kind tag
//! ```
use crate::core::{
    HEADER_LEN, KIND_OFFSET, MANUFACTURER_CODE, MARINE_INDUSTRY_CODE, MIN_POCO_PAYLOAD,
};
use crate::error::HeaderError;
use crate::protocol::lookups::PocoKind;
use crate::protocol::transport::can_frame::CanFrame;

const MANUFACTURER_MASK: u16 = 0x07FF;
const INDUSTRY_MASK: u8 = 0x07;
const INDUSTRY_SHIFT: u16 = 13;

/// Pack manufacturer and industry codes into the 2-byte header.
/// Both codes are masked to their width and the reserved bits stay zero.
pub fn pack_header(manufacturer_code: u16, industry_code: u8) -> [u8; HEADER_LEN] {
    let word = (manufacturer_code & MANUFACTURER_MASK)
        | (((industry_code & INDUSTRY_MASK) as u16) << INDUSTRY_SHIFT);
    word.to_le_bytes()
}

/// Unpack `(manufacturer_code, industry_code)` from the first two bytes.
pub fn unpack_header(bytes: &[u8]) -> Result<(u16, u8), HeaderError> {
    match bytes {
        [lo, hi, ..] => {
            let word = u16::from_le_bytes([*lo, *hi]);
            let manufacturer_code = word & MANUFACTURER_MASK;
            let industry_code = ((word >> INDUSTRY_SHIFT) as u8) & INDUSTRY_MASK;
            Ok((manufacturer_code, industry_code))
        }
        _ => Err(HeaderError::MalformedHeader {
            available: bytes.len(),
        }),
    }
}

/// `true` iff the frame carries a Poco payload: at least three bytes and the
/// Lumitec manufacturer code with the marine industry code.
pub fn is_recognized(frame: &CanFrame) -> bool {
    is_recognized_payload(frame.payload())
}

/// Kind tag of a recognized frame, `None` when the frame belongs to someone else.
pub fn kind_of(frame: &CanFrame) -> Option<u8> {
    let payload = frame.payload();
    if is_recognized_payload(payload) {
        Some(payload[KIND_OFFSET])
    } else {
        None
    }
}

fn is_recognized_payload(payload: &[u8]) -> bool {
    if payload.len() < MIN_POCO_PAYLOAD {
        return false;
    }
    matches!(
        unpack_header(payload),
        Ok((MANUFACTURER_CODE, MARINE_INDUSTRY_CODE))
    )
}

//==================================================================================PROPRIETARY_HEADER
/// Decoded header carried by every message value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProprietaryHeader {
    /// 11-bit manufacturer code.
    pub manufacturer_code: u16,
    /// 3-bit industry code.
    pub industry_code: u8,
    /// Raw kind tag.
    pub kind: u8,
}

impl ProprietaryHeader {
    /// Header an encoder emits for `kind`.
    pub const fn for_kind(kind: PocoKind) -> Self {
        Self {
            manufacturer_code: MANUFACTURER_CODE,
            industry_code: MARINE_INDUSTRY_CODE,
            kind: kind as u8,
        }
    }

    /// Read the header and kind tag from the start of a payload.
    pub fn read(payload: &[u8]) -> Result<Self, HeaderError> {
        let (manufacturer_code, industry_code) = unpack_header(payload)?;
        let kind = *payload
            .get(KIND_OFFSET)
            .ok_or(HeaderError::MalformedHeader {
                available: payload.len(),
            })?;
        Ok(Self {
            manufacturer_code,
            industry_code,
            kind,
        })
    }

    /// Typed view of the kind tag.
    pub fn poco_kind(&self) -> Option<PocoKind> {
        PocoKind::try_from(self.kind).ok()
    }
}
