//! Server-owned entities as seen by the client.

use chatroom_shared::ChatStatus;

/// The participant record returned on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub nickname: String,
    /// Avatar file name on the server (e.g. `"3.png"`)
    pub avatar: String,
    pub gender: String,
    pub is_online: bool,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    /// Sender's user id. Empty when the server omits it.
    pub user_id: String,
    pub nickname: String,
    pub avatar: String,
    pub gender: String,
    pub content: String,
    /// Server-formatted timestamp (`YYYY-MM-DD HH:MM:SS`)
    pub timestamp: String,
    pub is_self: bool,
}

impl ChatMessage {
    /// Recompute `is_self` relative to the receiving user.
    ///
    /// Broadcasts carry the flag as computed for the sender, so the sender id
    /// wins whenever both ids are known. Otherwise the server's flag stands.
    pub fn relative_to(mut self, current_user_id: Option<&str>) -> Self {
        if let Some(current) = current_user_id
            && !self.user_id.is_empty()
            && !current.is_empty()
        {
            self.is_self = self.user_id == current;
        }
        self
    }
}

/// Last-known room status with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomStatus {
    pub status: ChatStatus,
    pub custom_text: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub expected_open_time: Option<String>,
}

impl RoomStatus {
    pub fn new(status: ChatStatus, custom_text: Option<String>) -> Self {
        Self {
            status,
            custom_text,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ChatStatus::Open
    }
}
