//! Admin domain: server-owned records and the API seam.

pub mod api;
pub mod entity;

pub use api::AdminApi;
pub use entity::{AdminMessage, BlacklistEntry, ChatConfig, ChatUserRecord, SensitiveWord};

pub use chatroom_shared::ChatStatus;
