//! Generic framing engine for Poco payloads.
//!
//! Every message shape shares the same envelope: PGN 61184 identifier at
//! priority 6, the 2-byte proprietary header, the kind tag, then a fixed
//! layout body. The engine writes and checks the envelope once, and hands
//! only the body to the shape's [`PocoPayload`] implementation.
use super::traits::PocoPayload;
use crate::core::{
    DEFAULT_PRIORITY, HEADER_LEN, KIND_OFFSET, MANUFACTURER_CODE, MARINE_INDUSTRY_CODE,
    MAX_FRAME_PAYLOAD, MIN_POCO_PAYLOAD, POCO_PGN,
};
use crate::protocol::messages::header::{kind_of, pack_header, ProprietaryHeader};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::build_identifier;
use core::marker::PhantomData;

/// Compile-time bound on a shape's length: header plus kind at least, one
/// CAN frame at most. Referencing `VALID` for an out-of-range shape fails
/// the build instead of panicking on a slice at run time.
struct LenBound<P>(PhantomData<P>);

impl<P: PocoPayload> LenBound<P> {
    const VALID: () = assert!(
        P::LEN >= MIN_POCO_PAYLOAD && P::LEN <= MAX_FRAME_PAYLOAD,
        "PocoPayload::LEN must be within 3..=8"
    );
}

/// Serialize a message into a ready-to-send frame.
///
/// A shape whose `LEN` lies outside `3..=8` is rejected at compile time.
///
/// # Parameters
/// * `message` – shape to encode
/// * `source` – sender node address
/// * `destination` – target node address, `255` for broadcast
pub fn encode_frame<P: PocoPayload>(message: &P, source: u8, destination: u8) -> CanFrame {
    let () = LenBound::<P>::VALID;
    let mut data = [0u8; MAX_FRAME_PAYLOAD];
    data[..HEADER_LEN].copy_from_slice(&pack_header(MANUFACTURER_CODE, MARINE_INDUSTRY_CODE));
    data[KIND_OFFSET] = P::KIND.into();
    message.write_body(&mut data[MIN_POCO_PAYLOAD..P::LEN]);

    let id = build_identifier(POCO_PGN, source, destination, DEFAULT_PRIORITY);
    CanFrame::from_parts(id, data, P::LEN, destination)
}

/// Deserialize a frame into the shape `P`.
///
/// Returns `None` when the frame is not a Poco message, carries another kind
/// tag, or is shorter than `P::LEN`. Never fails otherwise: every body byte
/// is accepted as-is.
pub fn decode_frame<P: PocoPayload>(frame: &CanFrame) -> Option<P> {
    let () = LenBound::<P>::VALID;
    let kind = kind_of(frame)?;
    if kind != u8::from(P::KIND) || frame.len() < P::LEN {
        return None;
    }
    let payload = frame.payload();
    let header = ProprietaryHeader::read(payload).ok()?;
    Some(P::read_body(header, &payload[MIN_POCO_PAYLOAD..P::LEN]))
}
