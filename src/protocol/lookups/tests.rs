use super::*;

#[test]
fn test_known_action_round_trips_through_u8() {
    let raw: u8 = PocoAction::T2hsb.into();
    assert_eq!(raw, 8);
    assert_eq!(PocoAction::try_from(raw), Ok(PocoAction::T2hsb));
}

#[test]
/// Unlisted values come back inside the error instead of being lost.
fn test_unknown_action_keeps_raw_byte() {
    assert_eq!(PocoAction::try_from(5), Err(InvalidPocoAction(5)));
    assert_eq!(PocoAction::try_from(200), Err(InvalidPocoAction(200)));
}

#[test]
fn test_name_helpers() {
    assert_eq!(action_name(2), "On");
    assert_eq!(action_name(33), "Pattern Previous");
    assert_eq!(action_name(99), UNKNOWN_NAME);
    assert_eq!(switch_state_name(2), "Held");
    assert_eq!(switch_type_name(1), "Latching");
    assert_eq!(switch_type_name(7), UNKNOWN_NAME);
    assert_eq!(channel_mode_name(2), "PWM Dimming");
    assert_eq!(kind_name(16), "Output Channel PLI T2HSB");
    assert_eq!(kind_name(9), UNKNOWN_NAME);
}

#[test]
fn test_external_switch_kinds() {
    assert!(PocoKind::ExtSwCustomHsb.is_external_switch());
    assert!(!PocoKind::OutputChannelStatus.is_external_switch());
    assert!(!PocoKind::OutputChannelPliT2hsb.is_external_switch());
}

#[test]
fn test_defaults() {
    assert_eq!(PocoAction::default(), PocoAction::NoAction);
    assert_eq!(SwitchState::default(), SwitchState::Released);
    assert_eq!(SwitchType::default(), SwitchType::Momentary);
    assert_eq!(ChannelMode::default(), ChannelMode::Off);
}

#[test]
fn test_display_uses_label() {
    use core::fmt::Write;

    struct Buf {
        bytes: [u8; 32],
        len: usize,
    }
    impl Write for Buf {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = self.len + s.len();
            self.bytes[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }

    let mut buf = Buf { bytes: [0; 32], len: 0 };
    write!(buf, "{}", PocoAction::PlayPause).unwrap();
    assert_eq!(&buf.bytes[..buf.len], b"Play/Pause");
}
