//! Poco protocol on top of NMEA 2000: lookup tables, message structures,
//! CAN transport, and the async services.
pub mod lookups;
pub mod messages;
pub mod service;
pub mod transport;
