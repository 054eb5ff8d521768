//! `CanBus` extension that encodes Poco messages and puts them on the bus.
use crate::{
    core::{DEFAULT_PRIORITY, POCO_PGN},
    error::SendPocoError,
    protocol::messages::{OutputChannelMessage, PocoMessage},
    protocol::transport::can_frame::CanFrame,
    protocol::transport::can_id::build_identifier,
    protocol::transport::traits::can_bus::CanBus,
};

/// Blanket helpers available on every [`CanBus`].
///
/// ```rust,ignore
/// use poco_n2k::protocol::lookups::PocoAction;
/// use poco_n2k::protocol::messages::{PocoMessage, SimpleAction};
/// use poco_n2k::protocol::transport::traits::poco_sender::PocoSender;
///
/// let on = PocoMessage::from(SimpleAction::new(PocoAction::On, 1));
/// can_bus.send_poco(&on, my_address, poco_address).await?;
/// ```
pub trait PocoSender: CanBus {
    /// Encode an external-switch message and send it as one frame.
    fn send_poco<'a>(
        &'a mut self,
        message: &'a PocoMessage,
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a;

    /// Encode an output-channel message and send it as one frame.
    fn send_output_channel<'a>(
        &'a mut self,
        message: &'a OutputChannelMessage,
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a;

    /// Send an already-laid-out PGN 61184 payload (header included) at the
    /// default priority. Fails with [`SendPocoError::Build`] above 8 bytes.
    fn send_payload<'a>(
        &'a mut self,
        payload: &'a [u8],
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a;
}

impl<C: CanBus> PocoSender for C {
    fn send_poco<'a>(
        &'a mut self,
        message: &'a PocoMessage,
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a {
        async move {
            let frame = message.to_frame(source_address, destination);
            self.send(&frame).await.map_err(SendPocoError::Send)
        }
    }

    fn send_output_channel<'a>(
        &'a mut self,
        message: &'a OutputChannelMessage,
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a {
        async move {
            let frame = message.to_frame(source_address, destination);
            self.send(&frame).await.map_err(SendPocoError::Send)
        }
    }

    fn send_payload<'a>(
        &'a mut self,
        payload: &'a [u8],
        source_address: u8,
        destination: u8,
    ) -> impl core::future::Future<Output = Result<(), SendPocoError<Self::Error>>> + 'a {
        async move {
            let id = build_identifier(POCO_PGN, source_address, destination, DEFAULT_PRIORITY);
            let frame = CanFrame::with_addressing(id, payload, destination)
                .map_err(SendPocoError::Build)?;
            self.send(&frame).await.map_err(SendPocoError::Send)
        }
    }
}
