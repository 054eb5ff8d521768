//! Asynchronous CAN bus seam. The library never touches a controller
//! directly: HAL drivers, SocketCAN wrappers or test doubles implement this.
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Send and receive extended CAN frames.
pub trait CanBus {
    type Error: core::fmt::Debug;

    /// Emit a frame. Implementations should bound the wait with a timeout
    /// (see [`CAN_SEND_TIMEOUT_MS`](crate::protocol::transport::CAN_SEND_TIMEOUT_MS)).
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// Wait for the next frame, whatever its PGN.
    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<CanFrame, Self::Error>> + 'a;
}
