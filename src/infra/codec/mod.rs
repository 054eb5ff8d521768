//! Payload codec: the [`traits::PocoPayload`] contract and the engine that
//! frames any implementor into (and out of) a CAN frame.
pub mod engine;
pub mod traits;
