//! Poco message set carried by PGN 61184.
//!
//! [`parse_any`] is the entry point for traffic coming from switches and
//! keypads: it validates the proprietary header, reads the kind tag and
//! hands the frame to the matching decoder. Output-channel traffic has its
//! own dispatcher, [`output_channel::parse_output_channel`].
pub mod external_switch;
pub mod header;
pub mod output_channel;

pub use external_switch::{CustomHsb, SimpleAction, StartPattern, StateInfo};
pub use header::{is_recognized, kind_of, ProprietaryHeader};
pub use output_channel::{parse_output_channel, OutputChannelMessage};

use crate::core::BROADCAST_ADDRESS;
use crate::infra::codec::engine::{decode_frame, encode_frame};
use crate::infra::codec::traits::PocoPayload;
use crate::protocol::lookups::PocoKind;
use crate::protocol::transport::can_frame::CanFrame;

/// Any decoded external-switch message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PocoMessage {
    SimpleAction(SimpleAction),
    StateInfo(StateInfo),
    CustomHsb(CustomHsb),
    StartPattern(StartPattern),
}

impl PocoMessage {
    pub fn kind(&self) -> PocoKind {
        match self {
            Self::SimpleAction(_) => SimpleAction::KIND,
            Self::StateInfo(_) => StateInfo::KIND,
            Self::CustomHsb(_) => CustomHsb::KIND,
            Self::StartPattern(_) => StartPattern::KIND,
        }
    }

    /// Switch the message refers to.
    pub fn switch_id(&self) -> u8 {
        match self {
            Self::SimpleAction(m) => m.switch_id,
            Self::StateInfo(m) => m.switch_id,
            Self::CustomHsb(m) => m.switch_id,
            Self::StartPattern(m) => m.switch_id,
        }
    }

    /// Encode the message. State info is forced to broadcast whatever
    /// `destination` says.
    pub fn to_frame(&self, source: u8, destination: u8) -> CanFrame {
        match self {
            Self::SimpleAction(m) => encode_frame(m, source, destination),
            Self::StateInfo(m) => encode_frame(m, source, BROADCAST_ADDRESS),
            Self::CustomHsb(m) => encode_frame(m, source, destination),
            Self::StartPattern(m) => encode_frame(m, source, destination),
        }
    }
}

impl From<SimpleAction> for PocoMessage {
    fn from(value: SimpleAction) -> Self {
        Self::SimpleAction(value)
    }
}

impl From<StateInfo> for PocoMessage {
    fn from(value: StateInfo) -> Self {
        Self::StateInfo(value)
    }
}

impl From<CustomHsb> for PocoMessage {
    fn from(value: CustomHsb) -> Self {
        Self::CustomHsb(value)
    }
}

impl From<StartPattern> for PocoMessage {
    fn from(value: StartPattern) -> Self {
        Self::StartPattern(value)
    }
}

/// Decode any external-switch message.
///
/// Returns `None` when the frame is not a Poco frame, when the kind tag is
/// unknown or belongs to the output-channel set (5, 6, 7, 8, 16), or when
/// the payload is too short for its kind.
pub fn parse_any(frame: &CanFrame) -> Option<PocoMessage> {
    let kind = PocoKind::try_from(kind_of(frame)?).ok()?;
    match kind {
        PocoKind::ExtSwSimpleActions => decode_frame(frame).map(PocoMessage::SimpleAction),
        PocoKind::ExtSwStateInfo => decode_frame(frame).map(PocoMessage::StateInfo),
        PocoKind::ExtSwCustomHsb => decode_frame(frame).map(PocoMessage::CustomHsb),
        PocoKind::ExtSwStartPattern => decode_frame(frame).map(PocoMessage::StartPattern),
        PocoKind::OutputChannelStatus
        | PocoKind::OutputChannelBin
        | PocoKind::OutputChannelPwm
        | PocoKind::OutputChannelPli
        | PocoKind::OutputChannelPliT2hsb => None,
    }
}
