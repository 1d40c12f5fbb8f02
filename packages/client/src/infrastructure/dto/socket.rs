//! Event payload DTOs.

use serde::{Deserialize, Deserializer, Serialize};

use chatroom_shared::ChatStatus;

/// Event names on the wire.
pub mod event_name {
    pub const LOGIN: &str = "login";
    pub const LOGIN_SUCCESS: &str = "login_success";
    pub const LOGIN_ERROR: &str = "login_error";
    pub const NEW_MESSAGE: &str = "new_message";
    pub const SEND_MESSAGE: &str = "send_message";
    pub const SEND_ERROR: &str = "send_error";
    pub const ONLINE_COUNT: &str = "online_count";
    pub const GET_STATUS: &str = "get_status";
    pub const CHAT_STATUS: &str = "chat_status";
    pub const LOGOUT: &str = "logout";
    pub const LOGOUT_SUCCESS: &str = "logout_success";
    pub const KICK: &str = "kick";
    pub const KICKED: &str = "kicked";
    pub const HEARTBEAT: &str = "heartbeat";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub is_online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub gender: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    /// `null` or missing means "not self"
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_self: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccessDto {
    pub user: UserDto,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
}

/// `login_error` / `send_error`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineCountDto {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStatusDto {
    pub status: ChatStatus,
    #[serde(default)]
    pub custom_text: Option<String>,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub expected_open_time: Option<String>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
