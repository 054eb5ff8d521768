//! In-memory representation of an SAE J1939 / NMEA 2000 CAN frame.
use crate::core::{BROADCAST_ADDRESS, MAX_FRAME_PAYLOAD};
use crate::error::FrameBuildError;
use crate::protocol::transport::can_id::CanId;
use embedded_can::{ExtendedId, Id};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Single NMEA 2000 frame: extended identifier plus up to eight payload bytes.
///
/// Frames are immutable once built. Unused payload bytes are kept at zero so
/// two frames with the same visible payload compare equal.
pub struct CanFrame {
    id: CanId,
    data: [u8; MAX_FRAME_PAYLOAD],
    len: usize,
    priority: u8,
    source: u8,
    destination: u8,
}

impl CanFrame {
    /// Build a frame from a received identifier and payload.
    ///
    /// Priority and source come from the identifier; the destination is the
    /// PS byte of PDU1 identifiers and broadcast for PDU2 ones.
    pub fn new(id: CanId, payload: &[u8]) -> Result<Self, FrameBuildError> {
        let destination = id.destination().unwrap_or(BROADCAST_ADDRESS);
        Self::with_addressing(id, payload, destination)
    }

    /// Build a frame while recording the destination the caller addressed it to.
    pub fn with_addressing(
        id: CanId,
        payload: &[u8],
        destination: u8,
    ) -> Result<Self, FrameBuildError> {
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(FrameBuildError::PayloadTooLong { len: payload.len() });
        }
        let mut data = [0u8; MAX_FRAME_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            id,
            data,
            len: payload.len(),
            priority: id.priority(),
            source: id.source_address(),
            destination,
        })
    }

    /// Assemble a frame from an already-laid-out buffer. Callers pass a
    /// layout length checked against the buffer at compile time.
    pub(crate) fn from_parts(
        id: CanId,
        data: [u8; MAX_FRAME_PAYLOAD],
        len: usize,
        destination: u8,
    ) -> Self {
        debug_assert!(len <= MAX_FRAME_PAYLOAD);
        Self {
            id,
            data,
            len,
            priority: id.priority(),
            source: id.source_address(),
            destination,
        }
    }

    /// Full 29-bit identifier.
    pub fn id(&self) -> CanId {
        self.id
    }

    /// Valid payload bytes (Data Length Code bytes).
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Number of valid payload bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` for a zero-length frame.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn source_address(&self) -> u8 {
        self.source
    }

    /// Destination address; `255` means broadcast.
    pub fn destination_address(&self) -> u8 {
        self.destination
    }

    pub fn is_broadcast(&self) -> bool {
        self.destination == BROADCAST_ADDRESS
    }
}

//==================================================================================EMBEDDED_CAN
/// Lets HAL drivers built on `embedded-can` transmit and hand back Poco frames.
/// NMEA 2000 only uses extended data frames: standard IDs and remote frames are refused.
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Extended(ext) => CanFrame::new(CanId::from_raw(ext.as_raw()), data).ok(),
            Id::Standard(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        // `CanId` is always masked to 29 bits, so the fallback is unreachable.
        Id::Extended(ExtendedId::new(self.id.raw()).unwrap_or(ExtendedId::ZERO))
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
