//! Infrastructure layer: wire formats and the WebSocket transport.

pub mod dto;
pub mod socketio;
pub mod transport;
