//! Transport implementations.

pub mod websocket;

pub use websocket::{WebSocketTransport, socket_url};
