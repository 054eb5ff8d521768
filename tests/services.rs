//! Transport boundary and services against an in-memory bus.
mod helpers;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use helpers::{MockCanBus, MockTimer};
use poco_n2k::protocol::lookups::{ChannelMode, PocoAction, SwitchState, SwitchType};
use poco_n2k::protocol::messages::external_switch::{
    encode_simple_action, encode_state_info, SimpleAction, StateInfo,
};
use poco_n2k::protocol::messages::output_channel::{
    encode_output_channel_status, OutputChannelBin,
};
use poco_n2k::protocol::service::dispatcher::{
    AnyPocoMessage, CommandChannel, InboxChannel, PocoService, PocoServiceRunError,
};
use poco_n2k::protocol::service::listener::{collect_messages, collect_output_channels};
use poco_n2k::protocol::transport::traits::{can_bus::CanBus, poco_sender::PocoSender};
use poco_n2k::{
    build_identifier, parse_any, CanFrame, FrameBuildError, ListenError, OutputChannelMessage,
    PocoMessage, SendPocoError,
};
use static_cell::StaticCell;

//==================================================================================SENDER
#[tokio::test]
async fn send_poco_puts_encoded_frame_on_bus() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();

    let message = PocoMessage::from(SimpleAction::new(PocoAction::On, 1));
    dut_bus
        .send_poco(&message, 0x10, 0x0E)
        .await
        .expect("mock bus accepts frames");

    let frame = host_bus.recv().await.expect("frame expected");
    assert_eq!(frame.payload(), &[0xE8, 0x85, 0x01, 0x02, 0x01, 0x00]);
    assert_eq!(frame.source_address(), 0x10);
    assert_eq!(parse_any(&frame), Some(message));
}

#[tokio::test]
async fn send_output_channel_keeps_destination() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();

    let status = OutputChannelMessage::Bin(OutputChannelBin::new(2, 1));
    dut_bus.send_output_channel(&status, 0x21, 0x0E).await.unwrap();

    let frame = host_bus.recv().await.unwrap();
    assert_eq!(frame.payload(), &[0xE8, 0x85, 0x06, 0x02, 0x01]);
    assert_eq!(frame.destination_address(), 0x0E);
}

#[tokio::test]
async fn broadcast_state_info_arrives_with_zero_ps() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();

    let state = PocoMessage::from(StateInfo::new(1, SwitchState::Pressed, SwitchType::Momentary));
    dut_bus.send_poco(&state, 0x10, 0x0E).await.unwrap();

    let frame = host_bus.recv().await.unwrap();
    assert_eq!(frame.id(), build_identifier(61184, 0x10, 0xFF, 6));
    assert_eq!(frame.destination_address(), 0x00);
    assert_eq!(parse_any(&frame), Some(state));
}

#[tokio::test]
async fn send_payload_rejects_oversized_payload() {
    let (mut dut_bus, _host_bus) = MockCanBus::create_pair();

    let result = dut_bus.send_payload(&[0u8; 9], 0x10, 0x0E).await;
    assert!(matches!(
        result,
        Err(SendPocoError::Build(FrameBuildError::PayloadTooLong { len: 9 }))
    ));
}

#[tokio::test]
async fn send_payload_forwards_raw_bytes() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();

    dut_bus
        .send_payload(&[0xE8, 0x85, 0x04, 0x01, 0x07, 0x00], 0x10, 0x0E)
        .await
        .unwrap();

    let frame = host_bus.recv().await.unwrap();
    assert_eq!(frame.id(), build_identifier(61184, 0x10, 0x0E, 6));
    assert!(matches!(parse_any(&frame), Some(PocoMessage::StartPattern(_))));
}

//==================================================================================LISTENER
#[tokio::test]
async fn listener_collects_switch_messages_within_window() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();
    let mut timer = MockTimer;

    let foreign = CanFrame::new(build_identifier(61184, 0x30, 0x21, 6), &[0, 0, 1, 2, 1, 0]).unwrap();
    host_bus
        .send(&encode_simple_action(0x21, 0x10, PocoAction::Off, 4))
        .await
        .unwrap();
    host_bus.send(&foreign).await.unwrap();
    host_bus
        .send(&encode_state_info(0x11, 5, SwitchState::Held, SwitchType::Latching))
        .await
        .unwrap();
    host_bus
        .send(&encode_output_channel_status(0x40, 1, ChannelMode::Pwm, 10, 60, 3))
        .await
        .unwrap();

    let mut heard = [None; 8];
    let count = collect_messages(&mut dut_bus, &mut timer, Duration::from_millis(100), &mut heard)
        .await
        .expect("listening must succeed");

    assert_eq!(count, 2);
    let first = heard[0].expect("first slot filled");
    assert_eq!(first.source, 0x10);
    assert_eq!(first.message.switch_id(), 4);
    let second = heard[1].expect("second slot filled");
    assert_eq!(second.source, 0x11);
    assert!(matches!(second.message, PocoMessage::StateInfo(_)));
    assert!(heard[2].is_none());
}

#[tokio::test]
async fn listener_stops_filling_a_full_buffer() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();
    let mut timer = MockTimer;

    for switch_id in 0..3 {
        host_bus
            .send(&encode_simple_action(0x21, 0x10, PocoAction::On, switch_id))
            .await
            .unwrap();
    }

    let mut heard = [None; 1];
    let count = collect_messages(&mut dut_bus, &mut timer, Duration::from_millis(50), &mut heard)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(heard[0].map(|h| h.message.switch_id()), Some(0));
}

#[tokio::test]
async fn listener_collects_output_channel_traffic() {
    let (mut dut_bus, mut host_bus) = MockCanBus::create_pair();
    let mut timer = MockTimer;

    host_bus
        .send(&encode_output_channel_status(0x40, 1, ChannelMode::Pwm, 10, 60, 3))
        .await
        .unwrap();
    host_bus
        .send(&encode_simple_action(0x21, 0x10, PocoAction::On, 1))
        .await
        .unwrap();

    let mut heard = [None; 4];
    let count =
        collect_output_channels(&mut dut_bus, &mut timer, Duration::from_millis(50), &mut heard)
            .await
            .unwrap();

    assert_eq!(count, 1);
    let status = heard[0].unwrap();
    assert_eq!(status.source, 0x40);
    assert!(matches!(status.message, OutputChannelMessage::Status(_)));
}

#[tokio::test]
async fn listener_reports_bus_failure() {
    let (mut dut_bus, host_bus) = MockCanBus::create_pair();
    let mut timer = MockTimer;
    drop(host_bus);

    let mut heard = [None; 4];
    let result =
        collect_messages(&mut dut_bus, &mut timer, Duration::from_millis(500), &mut heard).await;
    assert!(matches!(result, Err(ListenError::Receive(()))));
}

//==================================================================================DISPATCHER
static COMMAND_CHANNEL: StaticCell<CommandChannel<CriticalSectionRawMutex, 4>> = StaticCell::new();
static INBOX_CHANNEL: StaticCell<InboxChannel<CriticalSectionRawMutex, 4>> = StaticCell::new();
static INBOX_ONLY_CHANNEL: StaticCell<InboxChannel<CriticalSectionRawMutex, 4>> =
    StaticCell::new();

#[tokio::test]
async fn dispatcher_queues_and_delivers() {
    let command_channel = COMMAND_CHANNEL.init(CommandChannel::new());
    let inbox_channel = INBOX_CHANNEL.init(InboxChannel::new());

    let (dut_bus, mut host_bus) = MockCanBus::create_pair();
    let service = PocoService::new(dut_bus, 0x21, Some(&*command_channel), Some(&*inbox_channel));
    let parts = service.into_parts();
    let handle = parts.handle.expect("handle exists when a command channel is given");
    let mut inbox = parts.inbox.expect("inbox exists when an inbox channel is given");
    let mut runner_future = core::pin::pin!(parts.runner.drive());

    tokio::select! {
        result = &mut runner_future => {
            panic!("runner ended unexpectedly: {:?}", result);
        }
        _ = async {
            // Outgoing: queued through the handle, stamped with the service address.
            handle.send(SimpleAction::new(PocoAction::DimUp, 3), 0x0E).await;
            let frame = host_bus.recv().await.expect("queued message must hit the bus");
            assert_eq!(frame.source_address(), 0x21);
            assert_eq!(frame.destination_address(), 0x0E);
            assert_eq!(frame.payload(), &[0xE8, 0x85, 0x01, 0x04, 0x03, 0x00]);

            // Incoming: decoded and handed to the inbox with its addressing.
            host_bus
                .send(&encode_simple_action(0x21, 0x10, PocoAction::Off, 2))
                .await
                .unwrap();
            let received = inbox.recv().await;
            assert_eq!(received.source, 0x10);
            assert_eq!(received.destination, 0x21);
            assert!(matches!(
                received.message,
                AnyPocoMessage::Switch(PocoMessage::SimpleAction(_))
            ));
        } => {}
    }
}

#[tokio::test]
async fn dispatcher_without_handle_filters_foreign_frames() {
    let inbox_channel = INBOX_ONLY_CHANNEL.init(InboxChannel::new());

    let (dut_bus, mut host_bus) = MockCanBus::create_pair();
    let service = PocoService::<_, CriticalSectionRawMutex, 1, 4>::new(
        dut_bus,
        0x21,
        None,
        Some(&*inbox_channel),
    );
    let parts = service.into_parts();
    assert!(parts.handle.is_none());
    let mut inbox = parts.inbox.unwrap();
    let mut runner_future = core::pin::pin!(parts.runner.drive());

    tokio::select! {
        result = &mut runner_future => {
            panic!("runner ended unexpectedly: {:?}", result);
        }
        _ = async {
            let foreign = CanFrame::new(build_identifier(61184, 0x30, 0x21, 6), &[1, 2, 3]).unwrap();
            host_bus.send(&foreign).await.unwrap();
            host_bus
                .send(&encode_output_channel_status(0x40, 1, ChannelMode::Bin, 255, 60, 5))
                .await
                .unwrap();

            let received = inbox.recv().await;
            assert_eq!(received.source, 0x40);
            // Broadcast Poco frames keep PS at the PGN low byte on the wire.
            assert_eq!(received.destination, 0x00);
            assert!(matches!(received.message, AnyPocoMessage::OutputChannel(_)));
            assert!(inbox.try_recv().is_none());
        } => {}
    }
}

#[tokio::test]
async fn dispatcher_stops_on_bus_failure() {
    let (dut_bus, host_bus) = MockCanBus::create_pair();
    drop(host_bus);

    let service = PocoService::<_, CriticalSectionRawMutex, 1, 1>::new(dut_bus, 0x21, None, None);
    let result = service.into_parts().runner.drive().await;
    assert!(matches!(
        result,
        Err(PocoServiceRunError::Listen(ListenError::Receive(())))
    ));
}
