//! `poco-n2k` library: encode and decode the Lumitec Poco proprietary
//! messages (PGN 61184) carried on NMEA 2000 in a `no_std` environment.
//! The crate exposes the infrastructure modules (codec engine), protocol
//! logic (messages, lookups, transport), and async services to run the
//! codec against a real bus.
#![no_std]
//==================================================================================
/// Protocol constants: manufacturer, industry, PGN, priorities.
pub mod core;
/// Domain and low-level errors (frame construction, header parsing,
/// transport boundary).
pub mod error;
/// Generic framing engine shared by every message shape.
pub mod infra;
/// Poco protocol implementation: CAN transport, messages, lookup tables and services.
pub mod protocol;
//==================================================================================

/// Library version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{FrameBuildError, HeaderError, ListenError, SendPocoError};
pub use protocol::messages::{
    is_recognized, kind_of, parse_any, parse_output_channel, OutputChannelMessage, PocoMessage,
};
pub use protocol::transport::can_frame::CanFrame;
pub use protocol::transport::can_id::{build_identifier, decompose_identifier, CanId};
