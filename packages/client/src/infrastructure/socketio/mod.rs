//! Socket.IO framing used by the chat server.

pub mod codec;

pub use codec::{EnginePacket, Handshake, SocketPacket, SocketPacketKind};
