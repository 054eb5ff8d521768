//! Async services built on the transport traits: a bounded listener and a
//! long-running dispatcher.
pub mod dispatcher;
pub mod listener;
