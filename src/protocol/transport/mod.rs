//! NMEA 2000 transport layer: CAN frame representation, 29-bit identifier
//! handling, and the bus abstraction traits.

pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Recommended timeout for sending a single CAN frame (ms).
///
/// On a 250 kbit/s NMEA 2000 bus one 8-byte frame takes about 0.5 ms; with
/// arbitration losses and retransmissions 10-20 ms is realistic.
///
/// [`CanBus`](traits::can_bus::CanBus) implementations **SHOULD**
/// enforce a timeout on `send()` to avoid infinite waits:
///
/// ```rust,ignore
/// use embassy_time::{with_timeout, Duration};
/// use poco_n2k::protocol::transport::CAN_SEND_TIMEOUT_MS;
///
/// async fn send(&mut self, frame: &CanFrame) -> Result<(), Error> {
///     with_timeout(
///         Duration::from_millis(CAN_SEND_TIMEOUT_MS as u64),
///         self.can.transmit_async(&twai_frame),
///     )
///     .await
///     .map_err(|_| Error::Timeout)?
/// }
/// ```
pub const CAN_SEND_TIMEOUT_MS: u32 = 100;
