//! Events exchanged with the chat server, independent of wire framing.

use super::{
    entity::{ChatMessage, RoomStatus, User},
    value_object::{MessageContent, Nickname},
};

/// Client → server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Login { nickname: Nickname },
    SendMessage { content: MessageContent },
    GetStatus,
    Logout,
    Heartbeat,
}

/// Server → client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Join accepted; `messages` is recent history, oldest first.
    LoginSuccess {
        user: User,
        messages: Vec<ChatMessage>,
    },
    LoginError {
        msg: String,
    },
    NewMessage(ChatMessage),
    SendError {
        msg: String,
    },
    OnlineCount(u64),
    RoomStatus(RoomStatus),
    LogoutSuccess,
    /// Forced termination (kick or ban)
    Kicked,
}
