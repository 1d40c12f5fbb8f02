//! Code shared by the chat room client and the admin console.

pub mod logger;
pub mod status;
pub mod text;
pub mod time;

pub use status::{ChatStatus, UnknownChatStatus};
