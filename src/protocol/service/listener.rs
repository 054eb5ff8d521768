//! Listen on the bus for a fixed window and collect the Poco messages seen.
//!
//! Useful for commissioning tools: press a keypad button, listen for a
//! second, and list which switches spoke.
use crate::error::ListenError;
use crate::protocol::messages::{parse_any, parse_output_channel, OutputChannelMessage, PocoMessage};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{can_bus::CanBus, poco_timer::PocoTimer};
use embassy_time::Duration;
use futures_util::future::{select, Either};
use futures_util::pin_mut;

/// A decoded message together with the node that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heard<M> {
    pub source: u8,
    pub message: M,
}

/// Collect external-switch messages for `window`.
///
/// Frames that are not Poco external-switch messages are skipped. Entries are
/// written to `out` from index 0; once it is full further messages are
/// discarded, but listening continues until the window closes. Returns the
/// number of entries written.
pub async fn collect_messages<C: CanBus, T: PocoTimer>(
    can_bus: &mut C,
    timer: &mut T,
    window: Duration,
    out: &mut [Option<Heard<PocoMessage>>],
) -> Result<usize, ListenError<C::Error>> {
    collect_with(can_bus, timer, window, out, parse_any).await
}

/// Collect output-channel messages (status reports, channel commands) for `window`.
pub async fn collect_output_channels<C: CanBus, T: PocoTimer>(
    can_bus: &mut C,
    timer: &mut T,
    window: Duration,
    out: &mut [Option<Heard<OutputChannelMessage>>],
) -> Result<usize, ListenError<C::Error>> {
    collect_with(can_bus, timer, window, out, parse_output_channel).await
}

async fn collect_with<C, T, M, F>(
    can_bus: &mut C,
    timer: &mut T,
    window: Duration,
    out: &mut [Option<Heard<M>>],
    parse: F,
) -> Result<usize, ListenError<C::Error>>
where
    C: CanBus,
    T: PocoTimer,
    F: Fn(&CanFrame) -> Option<M>,
{
    let millis = u32::try_from(window.as_millis()).unwrap_or(u32::MAX);
    let mut count = 0;

    let deadline = timer.delay_ms(millis);
    pin_mut!(deadline);

    loop {
        let recv = can_bus.recv();
        pin_mut!(recv);

        match select(deadline.as_mut(), recv).await {
            Either::Left(_) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Listening window closed, {} message(s) collected", count);
                return Ok(count);
            }
            Either::Right((Ok(frame), _)) => {
                let Some(message) = parse(&frame) else {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Skipping frame from {}", frame.source_address());
                    continue;
                };
                if count < out.len() {
                    out[count] = Some(Heard {
                        source: frame.source_address(),
                        message,
                    });
                    count += 1;
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Buffer full, dropping message from {}", frame.source_address());
                }
            }
            Either::Right((Err(e), _)) => return Err(ListenError::Receive(e)),
        }
    }
}
