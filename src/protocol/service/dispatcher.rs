//! Long-running Poco service.
//!
//! It owns the bus and optionally offers:
//!
//! * a transmission handle ([`PocoHandle`]) that queues messages for the bus;
//! * an inbox ([`PocoInbox`]) yielding every decoded Poco message heard.
//!
//! Firmware provides pre-allocated [`embassy_sync::channel::Channel`]
//! instances and picks the mutex flavour through `M`. Nothing is allocated
//! by the library.

use core::fmt::Debug;

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, Receiver, Sender},
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::error::{ListenError, SendPocoError};
use crate::protocol::messages::{parse_any, parse_output_channel, OutputChannelMessage, PocoMessage};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{can_bus::CanBus, poco_sender::PocoSender};

/// Channel carrying commands from handles to the runner.
pub type CommandChannel<M, const CAP: usize> = Channel<M, ServiceCommand, CAP>;
/// Channel carrying decoded traffic from the runner to the inbox.
pub type InboxChannel<M, const CAP: usize> = Channel<M, ReceivedMessage, CAP>;

/// Either family of Poco message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnyPocoMessage {
    Switch(PocoMessage),
    OutputChannel(OutputChannelMessage),
}

impl AnyPocoMessage {
    /// Decode any Poco frame, external-switch kinds first.
    pub fn parse(frame: &CanFrame) -> Option<Self> {
        parse_any(frame)
            .map(Self::Switch)
            .or_else(|| parse_output_channel(frame).map(Self::OutputChannel))
    }
}

/// Decoded message plus the addressing of the frame it came in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedMessage {
    pub source: u8,
    pub destination: u8,
    pub message: AnyPocoMessage,
}

/// Commands queued by producer tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    Send {
        message: AnyPocoMessage,
        destination: u8,
    },
}

#[derive(Debug)]
pub enum PocoServiceRunError<E: Debug> {
    Listen(ListenError<E>),
    Send(SendPocoError<E>),
}

impl<E: Debug> From<ListenError<E>> for PocoServiceRunError<E> {
    fn from(value: ListenError<E>) -> Self {
        Self::Listen(value)
    }
}

impl<E: Debug> From<SendPocoError<E>> for PocoServiceRunError<E> {
    fn from(value: SendPocoError<E>) -> Self {
        Self::Send(value)
    }
}

//==================================================================================SERVICE
/// Service assembling the dispatcher components.
pub struct PocoService<'a, C: CanBus, M: RawMutex, const CMD_CAP: usize, const INBOX_CAP: usize> {
    can_bus: C,
    source_address: u8,
    command_channel: Option<&'a CommandChannel<M, CMD_CAP>>,
    inbox_channel: Option<&'a InboxChannel<M, INBOX_CAP>>,
}

impl<'a, C, M, const CMD_CAP: usize, const INBOX_CAP: usize>
    PocoService<'a, C, M, CMD_CAP, INBOX_CAP>
where
    C: CanBus,
    M: RawMutex,
{
    /// `source_address` is the address this node already holds on the bus.
    pub fn new(
        can_bus: C,
        source_address: u8,
        command_channel: Option<&'a CommandChannel<M, CMD_CAP>>,
        inbox_channel: Option<&'a InboxChannel<M, INBOX_CAP>>,
    ) -> Self {
        Self {
            can_bus,
            source_address,
            command_channel,
            inbox_channel,
        }
    }

    /// Split into handle/inbox/runner components.
    pub fn into_parts(self) -> PocoServiceParts<'a, C, M, CMD_CAP, INBOX_CAP> {
        let handle = self.command_channel.map(|channel| PocoHandle {
            sender: channel.sender(),
        });
        let inbox = self.inbox_channel.map(|channel| PocoInbox {
            receiver: channel.receiver(),
        });
        PocoServiceParts {
            handle,
            inbox,
            runner: PocoRunner {
                can_bus: self.can_bus,
                source_address: self.source_address,
                command_channel: self.command_channel,
                inbox_channel: self.inbox_channel,
            },
        }
    }
}

/// Bundle returned by [`PocoService::into_parts`].
pub struct PocoServiceParts<'a, C, M, const CMD_CAP: usize, const INBOX_CAP: usize>
where
    C: CanBus,
    M: RawMutex,
{
    pub handle: Option<PocoHandle<'a, M, CMD_CAP>>,
    pub inbox: Option<PocoInbox<'a, M, INBOX_CAP>>,
    pub runner: PocoRunner<'a, C, M, CMD_CAP, INBOX_CAP>,
}

//==================================================================================RUNNER
/// Runner that drives the bus: forwards queued commands and decodes traffic.
pub struct PocoRunner<'a, C, M, const CMD_CAP: usize, const INBOX_CAP: usize>
where
    C: CanBus,
    M: RawMutex,
{
    can_bus: C,
    source_address: u8,
    command_channel: Option<&'a CommandChannel<M, CMD_CAP>>,
    inbox_channel: Option<&'a InboxChannel<M, INBOX_CAP>>,
}

impl<'a, C, M, const CMD_CAP: usize, const INBOX_CAP: usize>
    PocoRunner<'a, C, M, CMD_CAP, INBOX_CAP>
where
    C: CanBus,
    M: RawMutex,
{
    /// Run until the bus fails.
    pub async fn drive(mut self) -> Result<(), PocoServiceRunError<C::Error>> {
        let command_channel = self.command_channel;

        loop {
            match command_channel {
                Some(cmd_ch) => {
                    let mut command_to_process = None;
                    let mut frame_received = None;

                    {
                        let cmd_future = cmd_ch.receive();
                        let recv_future = self.can_bus.recv();
                        pin_mut!(cmd_future);
                        pin_mut!(recv_future);

                        match select(recv_future, cmd_future).await {
                            Either::Left((result, _pending_cmd)) => {
                                frame_received = Some(result.map_err(ListenError::Receive)?);
                            }
                            Either::Right((command, _pending_recv)) => {
                                command_to_process = Some(command);
                            }
                        }
                    }

                    if let Some(frame) = frame_received {
                        self.forward(&frame);
                    }

                    if let Some(command) = command_to_process {
                        self.handle_command(command).await?;
                    }
                }
                None => {
                    let frame = self.can_bus.recv().await.map_err(ListenError::Receive)?;
                    self.forward(&frame);
                }
            }
        }
    }

    /// Decode a frame and push it to the inbox. A full inbox drops the
    /// message so outgoing commands keep flowing.
    fn forward(&self, frame: &CanFrame) {
        let Some(inbox) = self.inbox_channel else {
            return;
        };
        let Some(message) = AnyPocoMessage::parse(frame) else {
            #[cfg(feature = "defmt")]
            defmt::trace!("Ignoring non-Poco frame from {}", frame.source_address());
            return;
        };

        let received = ReceivedMessage {
            source: frame.source_address(),
            destination: frame.destination_address(),
            message,
        };
        if inbox.try_send(received).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Inbox full, dropping message from {}", received.source);
        }
    }

    async fn handle_command(
        &mut self,
        command: ServiceCommand,
    ) -> Result<(), SendPocoError<C::Error>> {
        match command {
            ServiceCommand::Send {
                message,
                destination,
            } => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Sending queued message to {}", destination);
                let source = self.source_address;
                match message {
                    AnyPocoMessage::Switch(m) => {
                        self.can_bus.send_poco(&m, source, destination).await
                    }
                    AnyPocoMessage::OutputChannel(m) => {
                        self.can_bus
                            .send_output_channel(&m, source, destination)
                            .await
                    }
                }
            }
        }
    }
}

//==================================================================================HANDLE
/// Transmission handle (optional).
pub struct PocoHandle<'a, M: RawMutex, const CMD_CAP: usize> {
    sender: Sender<'a, M, ServiceCommand, CMD_CAP>,
}

impl<'a, M: RawMutex, const CMD_CAP: usize> PocoHandle<'a, M, CMD_CAP> {
    /// Queue an external-switch message. Waits while the queue is full.
    pub async fn send(&self, message: impl Into<PocoMessage>, destination: u8) {
        self.sender
            .send(ServiceCommand::Send {
                message: AnyPocoMessage::Switch(message.into()),
                destination,
            })
            .await;
    }

    /// Queue an output-channel message. Waits while the queue is full.
    pub async fn send_output_channel(&self, message: OutputChannelMessage, destination: u8) {
        self.sender
            .send(ServiceCommand::Send {
                message: AnyPocoMessage::OutputChannel(message),
                destination,
            })
            .await;
    }
}

impl<'a, M: RawMutex, const CMD_CAP: usize> Clone for PocoHandle<'a, M, CMD_CAP> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender,
        }
    }
}

//==================================================================================INBOX
/// Optional receiver yielding decoded Poco traffic.
pub struct PocoInbox<'a, M: RawMutex, const INBOX_CAP: usize> {
    receiver: Receiver<'a, M, ReceivedMessage, INBOX_CAP>,
}

impl<'a, M: RawMutex, const INBOX_CAP: usize> PocoInbox<'a, M, INBOX_CAP> {
    pub async fn recv(&mut self) -> ReceivedMessage {
        self.receiver.receive().await
    }

    /// Non-blocking variant; `None` when nothing is queued.
    pub fn try_recv(&mut self) -> Option<ReceivedMessage> {
        self.receiver.try_receive().ok()
    }
}
