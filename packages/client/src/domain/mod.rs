//! Domain model of a chat participant's session.
//!
//! Everything here is pure data and pure functions. Server-owned entities are
//! held only as a transient cache; the client never assigns identities.

pub mod entity;
pub mod event;
pub mod session;
pub mod transport;
pub mod value_object;

pub use entity::{ChatMessage, RoomStatus, User};
pub use event::{ClientEvent, ServerEvent};
pub use session::{Session, SessionConfig, SessionState};
pub use transport::{ConnectionId, Inbound, Signal, Transport};
pub use value_object::{MessageContent, Nickname};

pub use chatroom_shared::ChatStatus;
