//! Error definitions shared across library modules.
//!
//! "Not a Poco message" is never an error: validators return `false` and
//! decoders return `None`. The enums below only cover caller mistakes
//! (oversized payloads), the low-level header reader, and the transport
//! boundary.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while building a [`CanFrame`](crate::protocol::transport::can_frame::CanFrame).
pub enum FrameBuildError {
    /// Classic CAN frames carry at most eight bytes; the payload is never truncated.
    #[error("Payload too long: {len} bytes, a CAN frame holds at most 8")]
    PayloadTooLong { len: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures of the proprietary header reader.
pub enum HeaderError {
    /// Fewer than two bytes were available for the manufacturer/industry word.
    #[error("Malformed proprietary header: {available} byte(s) available, 2 required")]
    MalformedHeader { available: usize },
}

//==================================================================================SEND_ERROR
#[derive(Debug, Error)]
/// Errors encountered when pushing a Poco message onto the bus.
pub enum SendPocoError<E: core::fmt::Debug> {
    /// The frame could not be built from the provided parts.
    #[error("Frame build failed: {0:?}")]
    Build(FrameBuildError),
    /// CAN layer refused or failed to send the frame.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
}

//==================================================================================LISTEN_ERROR
#[derive(Debug, Error)]
/// Errors surfaced by the listening services.
pub enum ListenError<E: core::fmt::Debug> {
    /// Unable to receive frames from the bus.
    #[error("CAN bus receive error: {0:?}")]
    Receive(E),
    /// Unable to transmit a queued message.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
}
