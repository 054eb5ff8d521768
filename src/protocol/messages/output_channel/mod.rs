//! Output-channel messages: what Poco controllers report about, and accept
//! for, their own output channels (kinds 5, 6, 7, 8 and 16).
//!
//! These are device-side messages, so [`parse_any`](super::parse_any) leaves
//! them alone; [`parse_output_channel`] is their dedicated dispatcher.
//!
//! ```text
//! kind | name        | len | 3       | 4                  | 5                 | 6            | 7
//! -----+-------------+-----+---------+--------------------+-------------------+--------------+--------
//!  5   | Status      |  8  | channel | mode               | level             | voltage      | current
//!  6   | Bin         |  5  | channel | state              |                   |              |
//!  7   | Pwm         |  7  | channel | duty               | transition (LE u16, bytes 5-6)   |
//!  8   | Pli         |  8  | channel | PLI word (LE u32, bytes 4-7)                          |
//! 16   | PliT2hsb    |  7  | channel | clan:6 | trans:2   | bright:4 | hue_hi:4| hue_lo:4 | sat:3 | r:1
//! ```
use crate::core::BROADCAST_ADDRESS;
use crate::infra::codec::engine::{decode_frame, encode_frame};
use crate::infra::codec::traits::PocoPayload;
use crate::protocol::lookups::{ChannelMode, InvalidChannelMode, PocoKind};
use crate::protocol::messages::header::{kind_of, ProprietaryHeader};
use crate::protocol::transport::can_frame::CanFrame;

const CLAN_MASK: u8 = 0x3F;
const TRANSITION_MASK: u8 = 0x03;
const TRANSITION_SHIFT: u8 = 6;
const BRIGHTNESS_MASK: u8 = 0x0F;
const HUE_HIGH_MASK: u8 = 0xF0;
const HUE_LOW_MASK: u8 = 0x0F;
const SATURATION_MASK: u8 = 0x07;

//==================================================================================STATUS
/// Kind 5: periodic channel report, always broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannelStatus {
    pub header: ProprietaryHeader,
    pub channel: u8,
    pub channel_mode: u8,
    pub output_level: u8,
    /// Input voltage in 200 mV units.
    pub input_voltage: u8,
    /// Output current in 100 mA units.
    pub current: u8,
}

impl OutputChannelStatus {
    pub fn new(
        channel: u8,
        channel_mode: impl Into<u8>,
        output_level: u8,
        input_voltage: u8,
        current: u8,
    ) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            channel,
            channel_mode: channel_mode.into(),
            output_level,
            input_voltage,
            current,
        }
    }

    pub fn mode(&self) -> Result<ChannelMode, InvalidChannelMode> {
        ChannelMode::try_from(self.channel_mode)
    }

    /// Input voltage in millivolts.
    pub fn input_millivolts(&self) -> u32 {
        u32::from(self.input_voltage) * 200
    }

    /// Output current in milliamperes.
    pub fn current_milliamps(&self) -> u32 {
        u32::from(self.current) * 100
    }
}

impl PocoPayload for OutputChannelStatus {
    const KIND: PocoKind = PocoKind::OutputChannelStatus;
    const LEN: usize = 8;

    fn write_body(&self, body: &mut [u8]) {
        body.copy_from_slice(&[
            self.channel,
            self.channel_mode,
            self.output_level,
            self.input_voltage,
            self.current,
        ]);
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            channel: body[0],
            channel_mode: body[1],
            output_level: body[2],
            input_voltage: body[3],
            current: body[4],
        }
    }
}

//==================================================================================BIN
/// Kind 6: binary on/off command for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannelBin {
    pub header: ProprietaryHeader,
    pub channel: u8,
    /// `0` off, `1` on.
    pub state: u8,
}

impl OutputChannelBin {
    pub fn new(channel: u8, state: u8) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            channel,
            state,
        }
    }

    pub fn is_on(&self) -> bool {
        self.state != 0
    }
}

impl PocoPayload for OutputChannelBin {
    const KIND: PocoKind = PocoKind::OutputChannelBin;
    const LEN: usize = 5;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.channel;
        body[1] = self.state;
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            channel: body[0],
            state: body[1],
        }
    }
}

//==================================================================================PWM
/// Kind 7: PWM duty cycle with a transition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannelPwm {
    pub header: ProprietaryHeader,
    pub channel: u8,
    pub duty: u8,
    pub transition_time: u16,
}

impl OutputChannelPwm {
    pub fn new(channel: u8, duty: u8, transition_time: u16) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            channel,
            duty,
            transition_time,
        }
    }
}

impl PocoPayload for OutputChannelPwm {
    const KIND: PocoKind = PocoKind::OutputChannelPwm;
    const LEN: usize = 7;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.channel;
        body[1] = self.duty;
        body[2..4].copy_from_slice(&self.transition_time.to_le_bytes());
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            channel: body[0],
            duty: body[1],
            transition_time: u16::from_le_bytes([body[2], body[3]]),
        }
    }
}

//==================================================================================PLI
/// Kind 8: raw 32-bit Power Line Instruction forwarded to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannelPli {
    pub header: ProprietaryHeader,
    pub channel: u8,
    pub pli_message: u32,
}

impl OutputChannelPli {
    pub fn new(channel: u8, pli_message: u32) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            channel,
            pli_message,
        }
    }
}

impl PocoPayload for OutputChannelPli {
    const KIND: PocoKind = PocoKind::OutputChannelPli;
    const LEN: usize = 8;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.channel;
        body[1..5].copy_from_slice(&self.pli_message.to_le_bytes());
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            channel: body[0],
            pli_message: u32::from_le_bytes([body[1], body[2], body[3], body[4]]),
        }
    }
}

//==================================================================================PLI_T2HSB
/// Kind 16: PLI transition to hue, saturation and brightness, bit-packed.
///
/// Sub-byte fields are masked on construction, so a value always reads back
/// exactly as it is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannelPliT2hsb {
    pub header: ProprietaryHeader,
    pub channel: u8,
    /// 6 bits.
    pub pli_clan: u8,
    /// 2 bits.
    pub transition: u8,
    /// 4 bits.
    pub brightness: u8,
    pub hue: u8,
    /// 3 bits.
    pub saturation: u8,
}

impl OutputChannelPliT2hsb {
    pub fn new(
        channel: u8,
        pli_clan: u8,
        transition: u8,
        brightness: u8,
        hue: u8,
        saturation: u8,
    ) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            channel,
            pli_clan: pli_clan & CLAN_MASK,
            transition: transition & TRANSITION_MASK,
            brightness: brightness & BRIGHTNESS_MASK,
            hue,
            saturation: saturation & SATURATION_MASK,
        }
    }
}

impl PocoPayload for OutputChannelPliT2hsb {
    const KIND: PocoKind = PocoKind::OutputChannelPliT2hsb;
    const LEN: usize = 7;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.channel;
        body[1] = (self.pli_clan & CLAN_MASK)
            | ((self.transition & TRANSITION_MASK) << TRANSITION_SHIFT);
        body[2] = (self.brightness & BRIGHTNESS_MASK) | (self.hue & HUE_HIGH_MASK);
        body[3] = ((self.hue & HUE_LOW_MASK) << 4) | ((self.saturation & SATURATION_MASK) << 1);
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            channel: body[0],
            pli_clan: body[1] & CLAN_MASK,
            transition: (body[1] >> TRANSITION_SHIFT) & TRANSITION_MASK,
            brightness: body[2] & BRIGHTNESS_MASK,
            hue: (body[2] & HUE_HIGH_MASK) | ((body[3] >> 4) & HUE_LOW_MASK),
            saturation: (body[3] >> 1) & SATURATION_MASK,
        }
    }
}

/// Colour fields of a PLI T2HSB command, grouped to keep the encoder signature short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PliT2hsbFields {
    pub pli_clan: u8,
    pub transition: u8,
    pub brightness: u8,
    pub hue: u8,
    pub saturation: u8,
}

//==================================================================================ENCODERS
/// Encode an [`OutputChannelStatus`]. Status reports are always broadcast.
pub fn encode_output_channel_status(
    source: u8,
    channel: u8,
    channel_mode: impl Into<u8>,
    output_level: u8,
    input_voltage: u8,
    current: u8,
) -> CanFrame {
    encode_frame(
        &OutputChannelStatus::new(channel, channel_mode, output_level, input_voltage, current),
        source,
        BROADCAST_ADDRESS,
    )
}

pub fn encode_output_channel_bin(destination: u8, source: u8, channel: u8, state: u8) -> CanFrame {
    encode_frame(&OutputChannelBin::new(channel, state), source, destination)
}

pub fn encode_output_channel_pwm(
    destination: u8,
    source: u8,
    channel: u8,
    duty: u8,
    transition_time: u16,
) -> CanFrame {
    encode_frame(
        &OutputChannelPwm::new(channel, duty, transition_time),
        source,
        destination,
    )
}

pub fn encode_output_channel_pli(
    destination: u8,
    source: u8,
    channel: u8,
    pli_message: u32,
) -> CanFrame {
    encode_frame(&OutputChannelPli::new(channel, pli_message), source, destination)
}

/// Encode an [`OutputChannelPliT2hsb`]; clan, transition, brightness and
/// saturation are masked to their bit width.
pub fn encode_output_channel_pli_t2hsb(
    destination: u8,
    source: u8,
    channel: u8,
    fields: PliT2hsbFields,
) -> CanFrame {
    let message = OutputChannelPliT2hsb::new(
        channel,
        fields.pli_clan,
        fields.transition,
        fields.brightness,
        fields.hue,
        fields.saturation,
    );
    encode_frame(&message, source, destination)
}

//==================================================================================DECODERS
pub fn decode_output_channel_status(frame: &CanFrame) -> Option<OutputChannelStatus> {
    decode_frame(frame)
}

pub fn decode_output_channel_bin(frame: &CanFrame) -> Option<OutputChannelBin> {
    decode_frame(frame)
}

pub fn decode_output_channel_pwm(frame: &CanFrame) -> Option<OutputChannelPwm> {
    decode_frame(frame)
}

pub fn decode_output_channel_pli(frame: &CanFrame) -> Option<OutputChannelPli> {
    decode_frame(frame)
}

pub fn decode_output_channel_pli_t2hsb(frame: &CanFrame) -> Option<OutputChannelPliT2hsb> {
    decode_frame(frame)
}

//==================================================================================DISPATCH
/// Any decoded output-channel message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputChannelMessage {
    Status(OutputChannelStatus),
    Bin(OutputChannelBin),
    Pwm(OutputChannelPwm),
    Pli(OutputChannelPli),
    PliT2hsb(OutputChannelPliT2hsb),
}

impl OutputChannelMessage {
    pub fn kind(&self) -> PocoKind {
        match self {
            Self::Status(_) => OutputChannelStatus::KIND,
            Self::Bin(_) => OutputChannelBin::KIND,
            Self::Pwm(_) => OutputChannelPwm::KIND,
            Self::Pli(_) => OutputChannelPli::KIND,
            Self::PliT2hsb(_) => OutputChannelPliT2hsb::KIND,
        }
    }

    pub fn channel(&self) -> u8 {
        match self {
            Self::Status(m) => m.channel,
            Self::Bin(m) => m.channel,
            Self::Pwm(m) => m.channel,
            Self::Pli(m) => m.channel,
            Self::PliT2hsb(m) => m.channel,
        }
    }

    /// Encode the message. Status is forced to broadcast whatever `destination` says.
    pub fn to_frame(&self, source: u8, destination: u8) -> CanFrame {
        match self {
            Self::Status(m) => encode_frame(m, source, BROADCAST_ADDRESS),
            Self::Bin(m) => encode_frame(m, source, destination),
            Self::Pwm(m) => encode_frame(m, source, destination),
            Self::Pli(m) => encode_frame(m, source, destination),
            Self::PliT2hsb(m) => encode_frame(m, source, destination),
        }
    }
}

/// Decode an output-channel frame; `None` for anything else, external-switch
/// kinds included.
pub fn parse_output_channel(frame: &CanFrame) -> Option<OutputChannelMessage> {
    let kind = PocoKind::try_from(kind_of(frame)?).ok()?;
    match kind {
        PocoKind::OutputChannelStatus => decode_frame(frame).map(OutputChannelMessage::Status),
        PocoKind::OutputChannelBin => decode_frame(frame).map(OutputChannelMessage::Bin),
        PocoKind::OutputChannelPwm => decode_frame(frame).map(OutputChannelMessage::Pwm),
        PocoKind::OutputChannelPli => decode_frame(frame).map(OutputChannelMessage::Pli),
        PocoKind::OutputChannelPliT2hsb => decode_frame(frame).map(OutputChannelMessage::PliT2hsb),
        PocoKind::ExtSwSimpleActions
        | PocoKind::ExtSwStateInfo
        | PocoKind::ExtSwCustomHsb
        | PocoKind::ExtSwStartPattern => None,
    }
}
