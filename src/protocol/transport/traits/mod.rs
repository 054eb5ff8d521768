//! Abstraction traits used by the transport layer (CAN bus, timer, and Poco sender).
pub mod can_bus;
pub mod poco_sender;
pub mod poco_timer;
