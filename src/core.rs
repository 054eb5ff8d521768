//! Protocol constants shared by every layer of the crate.
//!
//! Poco messages travel as NMEA 2000 proprietary single-frame PGN 61184
//! (`0xEF00`, PDU1). Every payload starts with the same 2-byte proprietary
//! header followed by a 1-byte kind tag, so the values below are the whole
//! "configuration" of the codec: they are fixed by the protocol, not by the
//! caller.

/// NMEA 2000 manufacturer code assigned to Lumitec (11 bits).
pub const MANUFACTURER_CODE: u16 = 1512;

/// Industry group for marine equipment (3 bits).
pub const MARINE_INDUSTRY_CODE: u8 = 4;

/// Proprietary single-frame addressed PGN carrying every Poco message.
pub const POCO_PGN: u32 = 61184;

/// Priority applied by the encoders.
pub const DEFAULT_PRIORITY: u8 = 6;

/// Destination address meaning "all nodes".
pub const BROADCAST_ADDRESS: u8 = 255;

/// Classic CAN payload capacity.
pub const MAX_FRAME_PAYLOAD: usize = 8;

/// Size of the packed manufacturer/industry word.
pub const HEADER_LEN: usize = 2;

/// Header plus kind tag: the shortest payload that can be recognized.
pub const MIN_POCO_PAYLOAD: usize = HEADER_LEN + 1;

/// Offset of the kind tag inside the payload.
pub const KIND_OFFSET: usize = HEADER_LEN;
