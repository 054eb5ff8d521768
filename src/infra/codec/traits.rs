//! Public traits exposed by the codec engine. They decouple the message
//! structures from the framing logic (header, kind tag, length checks) and
//! provide a uniform API to upper layers.
use crate::core::MIN_POCO_PAYLOAD;
use crate::protocol::lookups::PocoKind;
use crate::protocol::messages::header::ProprietaryHeader;

//==================================================================================POCO_PAYLOAD
/// Implemented by every Poco message shape.
///
/// A shape only describes its *body*: the bytes after the 2-byte header and
/// the kind tag. The engine owns everything else.
///
/// ```text
/// payload = header(2) | kind(1) | body(LEN - 3)
/// ```
pub trait PocoPayload: Sized {
    /// Kind tag written at payload offset 2.
    const KIND: PocoKind;

    /// Full payload length in bytes, header included. Must lie within
    /// `3..=8`; the engine refuses to build otherwise.
    const LEN: usize;

    /// Body length derived from [`Self::LEN`].
    const BODY_LEN: usize = Self::LEN - MIN_POCO_PAYLOAD;

    /// Write the body. `body` is exactly [`Self::BODY_LEN`] bytes long and
    /// zero-filled, so reserved bytes need no explicit write.
    fn write_body(&self, body: &mut [u8]);

    /// Rebuild the message from a body of exactly [`Self::BODY_LEN`] bytes.
    /// Extra bytes a sender appended past [`Self::LEN`] are not visible here.
    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self;
}
