//! End-to-end codec scenarios through the public API only.
use poco_n2k::core::{BROADCAST_ADDRESS, POCO_PGN};
use poco_n2k::protocol::lookups::{action_name, PocoAction, SwitchState, SwitchType};
use poco_n2k::protocol::messages::external_switch::{
    encode_custom_hsb, encode_simple_action, encode_state_info,
};
use poco_n2k::protocol::messages::header::{pack_header, unpack_header};
use poco_n2k::{
    build_identifier, decompose_identifier, is_recognized, kind_of, parse_any, CanFrame, CanId,
    HeaderError, PocoMessage,
};

#[test]
fn keypad_on_press_reaches_controller() {
    // Keypad at 0x10 tells the controller at 0x0E to turn switch 1 on.
    let frame = encode_simple_action(0x0E, 0x10, PocoAction::On, 1);
    assert_eq!(frame.payload(), &[0xE8, 0x85, 0x01, 0x02, 0x01, 0x00]);

    let parts = decompose_identifier(frame.id());
    assert_eq!(parts.priority, 6);
    assert_eq!(parts.source, 0x10);
    assert_eq!(parts.pgn, POCO_PGN);

    // The controller sees the bytes as they come off the wire.
    let wire = CanFrame::new(CanId::from_raw(frame.id().raw()), frame.payload()).unwrap();
    match parse_any(&wire) {
        Some(PocoMessage::SimpleAction(action)) => {
            assert_eq!(action.action(), Ok(PocoAction::On));
            assert_eq!(action_name(action.action_id), "On");
            assert_eq!(action.switch_id, 1);
        }
        other => panic!("expected a simple action, got {other:?}"),
    }
}

#[test]
fn custom_colour_command_bytes() {
    let frame = encode_custom_hsb(0x0E, 0x10, PocoAction::T2hsb, 1, 128, 255, 200);
    assert_eq!(
        frame.payload(),
        &[0xE8, 0x85, 0x03, 0x08, 0x01, 0x80, 0xFF, 0xC8]
    );
    assert_eq!(frame.destination_address(), 0x0E);
}

#[test]
fn state_report_goes_to_everyone() {
    let frame = encode_state_info(0x10, 2, SwitchState::Pressed, SwitchType::Momentary);
    assert_eq!(frame.destination_address(), BROADCAST_ADDRESS);
    assert_eq!(frame.id(), build_identifier(POCO_PGN, 0x10, BROADCAST_ADDRESS, 6));
}

#[test]
fn foreign_proprietary_traffic_is_ignored() {
    let id = build_identifier(POCO_PGN, 0x22, 0x0E, 6);

    let zeros = CanFrame::new(id, &[0, 0, 1, 2, 1, 0]).unwrap();
    assert!(!is_recognized(&zeros));
    assert_eq!(kind_of(&zeros), None);

    // Right manufacturer, wrong industry.
    let other_industry = pack_header(1512, 1);
    let frame = CanFrame::new(id, &[other_industry[0], other_industry[1], 1, 2, 1, 0]).unwrap();
    assert!(!is_recognized(&frame));

    // Two bytes only: header readable, but no kind tag.
    let short = CanFrame::new(id, &[0xE8, 0x85]).unwrap();
    assert!(!is_recognized(&short));
    assert_eq!(parse_any(&short), None);
}

#[test]
fn header_reader_needs_two_bytes() {
    assert_eq!(unpack_header(&[0xE8, 0x85]), Ok((1512, 4)));
    assert_eq!(
        unpack_header(&[0xE8]),
        Err(HeaderError::MalformedHeader { available: 1 })
    );
}

#[test]
fn version_is_exposed() {
    assert_eq!(poco_n2k::VERSION, env!("CARGO_PKG_VERSION"));
}
