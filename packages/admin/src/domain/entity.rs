//! Server-owned records shown by the admin console.
//!
//! These are displayed as received; the console performs no matching or
//! enforcement on them.

use serde::{Deserialize, Deserializer, Serialize};

use chatroom_shared::ChatStatus;

/// Room gate configuration. `GET` may return `{}` when nothing is stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub status: ChatStatus,
    #[serde(deserialize_with = "null_as_empty")]
    pub open_time: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub close_time: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub custom_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub expected_open_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveWord {
    pub id: String,
    pub word: String,
}

/// A blacklisted user; `user_id` and friends are empty if the user is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminMessage {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub device: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUserRecord {
    pub id: String,
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub device: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_blacklisted: bool,
    #[serde(default)]
    pub last_active_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_msg: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
