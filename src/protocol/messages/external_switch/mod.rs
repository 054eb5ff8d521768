//! External-switch messages: what keypads and switch panels send to Poco
//! controllers (kinds 1 to 4).
//!
//! ```text
//! kind | name          | len | 3         | 4         | 5          | 6          | 7
//! -----+---------------+-----+-----------+-----------+------------+------------+-----------
//!  1   | SimpleAction  |  6  | action_id | switch_id | 0          |            |
//!  2   | StateInfo     |  7  | switch_id | state     | type       | 0          |
//!  3   | CustomHsb     |  8  | action_id | switch_id | hue        | saturation | brightness
//!  4   | StartPattern  |  6  | switch_id | pattern   | 0          |            |
//! ```
//!
//! Enumerated bytes (`action_id`, `switch_state`, `switch_type`) are stored
//! raw; the typed accessors return the lookup error when a value is unknown.
use crate::core::BROADCAST_ADDRESS;
use crate::infra::codec::engine::{decode_frame, encode_frame};
use crate::infra::codec::traits::PocoPayload;
use crate::protocol::lookups::{
    InvalidPocoAction, InvalidSwitchState, InvalidSwitchType, PocoAction, PocoKind, SwitchState,
    SwitchType,
};
use crate::protocol::messages::header::ProprietaryHeader;
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================SIMPLE_ACTION
/// Kind 1: on/off/dim style command for one switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimpleAction {
    pub header: ProprietaryHeader,
    pub action_id: u8,
    pub switch_id: u8,
}

impl SimpleAction {
    pub fn new(action: impl Into<u8>, switch_id: u8) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            action_id: action.into(),
            switch_id,
        }
    }

    pub fn action(&self) -> Result<PocoAction, InvalidPocoAction> {
        PocoAction::try_from(self.action_id)
    }
}

impl PocoPayload for SimpleAction {
    const KIND: PocoKind = PocoKind::ExtSwSimpleActions;
    const LEN: usize = 6;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.action_id;
        body[1] = self.switch_id;
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            action_id: body[0],
            switch_id: body[1],
        }
    }
}

//==================================================================================STATE_INFO
/// Kind 2: switch state report, always broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateInfo {
    pub header: ProprietaryHeader,
    pub switch_id: u8,
    pub switch_state: u8,
    pub switch_type: u8,
}

impl StateInfo {
    pub fn new(switch_id: u8, switch_state: impl Into<u8>, switch_type: impl Into<u8>) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            switch_id,
            switch_state: switch_state.into(),
            switch_type: switch_type.into(),
        }
    }

    pub fn state(&self) -> Result<SwitchState, InvalidSwitchState> {
        SwitchState::try_from(self.switch_state)
    }

    pub fn kind_of_switch(&self) -> Result<SwitchType, InvalidSwitchType> {
        SwitchType::try_from(self.switch_type)
    }
}

impl PocoPayload for StateInfo {
    const KIND: PocoKind = PocoKind::ExtSwStateInfo;
    const LEN: usize = 7;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.switch_id;
        body[1] = self.switch_state;
        body[2] = self.switch_type;
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            switch_id: body[0],
            switch_state: body[1],
            switch_type: body[2],
        }
    }
}

//==================================================================================CUSTOM_HSB
/// Kind 3: action with an explicit hue, saturation and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CustomHsb {
    pub header: ProprietaryHeader,
    pub action_id: u8,
    pub switch_id: u8,
    pub hue: u8,
    pub saturation: u8,
    pub brightness: u8,
}

impl CustomHsb {
    pub fn new(
        action: impl Into<u8>,
        switch_id: u8,
        hue: u8,
        saturation: u8,
        brightness: u8,
    ) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            action_id: action.into(),
            switch_id,
            hue,
            saturation,
            brightness,
        }
    }

    pub fn action(&self) -> Result<PocoAction, InvalidPocoAction> {
        PocoAction::try_from(self.action_id)
    }
}

impl PocoPayload for CustomHsb {
    const KIND: PocoKind = PocoKind::ExtSwCustomHsb;
    const LEN: usize = 8;

    fn write_body(&self, body: &mut [u8]) {
        body.copy_from_slice(&[
            self.action_id,
            self.switch_id,
            self.hue,
            self.saturation,
            self.brightness,
        ]);
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            action_id: body[0],
            switch_id: body[1],
            hue: body[2],
            saturation: body[3],
            brightness: body[4],
        }
    }
}

//==================================================================================START_PATTERN
/// Kind 4: start a stored pattern on a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartPattern {
    pub header: ProprietaryHeader,
    pub switch_id: u8,
    pub pattern_id: u8,
}

impl StartPattern {
    pub fn new(switch_id: u8, pattern_id: u8) -> Self {
        Self {
            header: ProprietaryHeader::for_kind(Self::KIND),
            switch_id,
            pattern_id,
        }
    }
}

impl PocoPayload for StartPattern {
    const KIND: PocoKind = PocoKind::ExtSwStartPattern;
    const LEN: usize = 6;

    fn write_body(&self, body: &mut [u8]) {
        body[0] = self.switch_id;
        body[1] = self.pattern_id;
    }

    fn read_body(header: ProprietaryHeader, body: &[u8]) -> Self {
        Self {
            header,
            switch_id: body[0],
            pattern_id: body[1],
        }
    }
}

//==================================================================================ENCODERS
/// Encode a [`SimpleAction`] from `source` to `destination`.
pub fn encode_simple_action(
    destination: u8,
    source: u8,
    action: impl Into<u8>,
    switch_id: u8,
) -> CanFrame {
    encode_frame(&SimpleAction::new(action, switch_id), source, destination)
}

/// Encode a [`StateInfo`]. State reports are always broadcast.
pub fn encode_state_info(
    source: u8,
    switch_id: u8,
    switch_state: impl Into<u8>,
    switch_type: impl Into<u8>,
) -> CanFrame {
    encode_frame(
        &StateInfo::new(switch_id, switch_state, switch_type),
        source,
        BROADCAST_ADDRESS,
    )
}

/// Encode a [`CustomHsb`] from `source` to `destination`.
pub fn encode_custom_hsb(
    destination: u8,
    source: u8,
    action: impl Into<u8>,
    switch_id: u8,
    hue: u8,
    saturation: u8,
    brightness: u8,
) -> CanFrame {
    encode_frame(
        &CustomHsb::new(action, switch_id, hue, saturation, brightness),
        source,
        destination,
    )
}

/// Encode a [`StartPattern`] from `source` to `destination`.
pub fn encode_start_pattern(destination: u8, source: u8, switch_id: u8, pattern_id: u8) -> CanFrame {
    encode_frame(&StartPattern::new(switch_id, pattern_id), source, destination)
}

//==================================================================================DECODERS
pub fn decode_simple_action(frame: &CanFrame) -> Option<SimpleAction> {
    decode_frame(frame)
}

pub fn decode_state_info(frame: &CanFrame) -> Option<StateInfo> {
    decode_frame(frame)
}

pub fn decode_custom_hsb(frame: &CanFrame) -> Option<CustomHsb> {
    decode_frame(frame)
}

pub fn decode_start_pattern(frame: &CanFrame) -> Option<StartPattern> {
    decode_frame(frame)
}
