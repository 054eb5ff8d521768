//! Lookup tables for the enumerated bytes carried by Poco messages.
//!
//! Every table is a closed `#[repr(u8)]` enum with a `TryFrom<u8>` that hands
//! the raw byte back inside an `Invalid*` error when it is not listed.
//! Messages themselves store the raw byte, so firmware using newer values
//! still decodes; these enums only give names to the values we know.
use core::fmt;

/// Text returned by the `*_name` helpers for values missing from a table.
pub const UNKNOWN_NAME: &str = "Unknown";

macro_rules! lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $invalid:ident, $lookup_fn:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        /// Raw byte that has no entry in the table.
        #[derive(Debug, PartialEq, Eq, Copy, Clone)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $invalid(pub u8);

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = $invalid;
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    other => Err($invalid(other)),
                }
            }
        }

        impl $name {
            /// Human-readable label.
            pub const fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        /// Label for a raw byte, or [`UNKNOWN_NAME`].
        pub fn $lookup_fn(raw: u8) -> &'static str {
            $name::try_from(raw).map_or(UNKNOWN_NAME, |value| value.name())
        }
    };
}

lookup_enum! {
    /// Kind tag (proprietary ID) stored in payload byte 2.
    PocoKind, InvalidPocoKind, kind_name {
        ExtSwSimpleActions = 1 => "ExtSw Simple Actions",
        ExtSwStateInfo = 2 => "ExtSw State Info",
        ExtSwCustomHsb = 3 => "ExtSw Custom HSB",
        ExtSwStartPattern = 4 => "ExtSw Start Pattern",
        OutputChannelStatus = 5 => "Output Channel Status",
        OutputChannelBin = 6 => "Output Channel Binary",
        OutputChannelPwm = 7 => "Output Channel PWM",
        OutputChannelPli = 8 => "Output Channel PLI",
        OutputChannelPliT2hsb = 16 => "Output Channel PLI T2HSB",
    }
}

impl PocoKind {
    /// Kinds emitted by external switches and keypads (handled by `parse_any`).
    pub const fn is_external_switch(&self) -> bool {
        (*self as u8) <= 4
    }
}

lookup_enum! {
    /// Action requested by an external switch.
    #[derive(Default)]
    PocoAction, InvalidPocoAction, action_name {
        #[default]
        NoAction = 0 => "No Action",
        Off = 1 => "Off",
        On = 2 => "On",
        DimDown = 3 => "Dim Down",
        DimUp = 4 => "Dim Up",
        PatternStart = 6 => "Pattern Start",
        PatternPause = 7 => "Pattern Pause",
        /// Transition to the default hue, saturation and brightness.
        T2hsb = 8 => "T2HSB",
        /// Transition to the default hue and saturation.
        T2hs = 9 => "T2HS",
        /// Transition to the default brightness.
        T2b = 10 => "T2B",
        White = 20 => "White",
        Red = 21 => "Red",
        Green = 22 => "Green",
        Blue = 23 => "Blue",
        PlayPause = 31 => "Play/Pause",
        PatternNext = 32 => "Pattern Next",
        PatternPrev = 33 => "Pattern Previous",
    }
}

lookup_enum! {
    /// Physical state reported by an external switch.
    #[derive(Default)]
    SwitchState, InvalidSwitchState, switch_state_name {
        #[default]
        Released = 0 => "Released",
        Pressed = 1 => "Pressed",
        Held = 2 => "Held",
    }
}

lookup_enum! {
    /// Mechanical behaviour of an external switch.
    #[derive(Default)]
    SwitchType, InvalidSwitchType, switch_type_name {
        #[default]
        Momentary = 0 => "Momentary",
        Latching = 1 => "Latching",
    }
}

lookup_enum! {
    /// Drive mode of a Poco output channel.
    #[derive(Default)]
    ChannelMode, InvalidChannelMode, channel_mode_name {
        #[default]
        Off = 0 => "None/Off",
        Bin = 1 => "Binary On/Off",
        Pwm = 2 => "PWM Dimming",
        Pli = 3 => "PLI",
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
