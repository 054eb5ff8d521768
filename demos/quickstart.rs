//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of poco-n2k:
//! - Encode keypad commands for a Poco controller
//! - Recognize and decode incoming frames
//! - Read an output-channel status report
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use poco_n2k::protocol::lookups::{action_name, kind_name, PocoAction, SwitchState, SwitchType};
use poco_n2k::protocol::messages::external_switch::{
    encode_custom_hsb, encode_simple_action, encode_state_info,
};
use poco_n2k::protocol::messages::output_channel::encode_output_channel_status;
use poco_n2k::{decompose_identifier, kind_of, parse_any, parse_output_channel, CanFrame, CanId};
use poco_n2k::{OutputChannelMessage, PocoMessage};

const KEYPAD_ADDRESS: u8 = 0x10;
const POCO_ADDRESS: u8 = 0x0E;

fn print_frame(label: &str, frame: &CanFrame) {
    print!("   {label}: id 0x{:08X} payload ", frame.id().raw());
    for byte in frame.payload() {
        print!("{:02X} ", byte);
    }
    println!();
}

fn main() {
    println!("=== poco-n2k {} Quickstart ===\n", poco_n2k::VERSION);

    // ======================================================================
    // 1. Encode keypad commands
    // ======================================================================
    println!("1. Encoding keypad commands");

    let on = encode_simple_action(POCO_ADDRESS, KEYPAD_ADDRESS, PocoAction::On, 1);
    print_frame("Switch 1 ON", &on);

    let colour = encode_custom_hsb(POCO_ADDRESS, KEYPAD_ADDRESS, PocoAction::T2hsb, 1, 128, 255, 200);
    print_frame("Switch 1 HSB", &colour);

    let state = encode_state_info(KEYPAD_ADDRESS, 1, SwitchState::Pressed, SwitchType::Momentary);
    print_frame("Switch 1 state", &state);

    let parts = decompose_identifier(on.id());
    println!(
        "   Identifier: priority {}, PGN {}, source 0x{:02X}\n",
        parts.priority, parts.pgn, parts.source
    );

    // ======================================================================
    // 2. Decode frames coming off the bus
    // ======================================================================
    println!("2. Decoding received frames");

    let received = [
        CanFrame::new(CanId::from_raw(0x18EF0E10), &[0xE8, 0x85, 0x01, 0x04, 0x02, 0x00]),
        CanFrame::new(CanId::from_raw(0x18EF0E22), &[0x00, 0x00, 0x01, 0x02, 0x01, 0x00]),
    ];

    for frame in received.iter().flatten() {
        match (kind_of(frame), parse_any(frame)) {
            (Some(kind), Some(PocoMessage::SimpleAction(action))) => println!(
                "   {} from 0x{:02X}: {} on switch {}",
                kind_name(kind),
                frame.source_address(),
                action_name(action.action_id),
                action.switch_id
            ),
            (Some(kind), Some(other)) => println!("   {}: {:?}", kind_name(kind), other),
            _ => println!(
                "   Frame from 0x{:02X} is not a Poco message",
                frame.source_address()
            ),
        }
    }
    println!();

    // ======================================================================
    // 3. Read an output-channel status report
    // ======================================================================
    println!("3. Output channel status");

    let status_frame = encode_output_channel_status(POCO_ADDRESS, 2, 2u8, 180, 64, 12);
    if let Some(OutputChannelMessage::Status(status)) = parse_output_channel(&status_frame) {
        println!("   Channel {}: mode {}", status.channel, status.mode().map_or("Unknown", |m| m.name()));
        println!("   Level: {}", status.output_level);
        println!("   Input: {} mV, current: {} mA", status.input_millivolts(), status.current_milliamps());
    }

    println!("\n=== Done ===");
}
