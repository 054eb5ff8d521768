//! Infrastructure shared by every message shape: the payload codec engine.
pub mod codec;
