//! Conversion logic between named wire events and domain events.

use serde_json::Value;

use crate::{
    domain::{ChatMessage, ClientEvent, RoomStatus, ServerEvent, User},
    error::CodecError,
};

use super::socket::{
    ChatStatusDto, ErrorDto, LoginRequest, LoginSuccessDto, MessageDto, OnlineCountDto,
    SendMessageRequest, UserDto, event_name,
};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            nickname: dto.nickname,
            avatar: dto.avatar,
            gender: dto.gender,
            is_online: dto.is_online,
        }
    }
}

impl From<MessageDto> for ChatMessage {
    fn from(dto: MessageDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
            nickname: dto.nickname,
            avatar: dto.avatar,
            gender: dto.gender,
            content: dto.content,
            timestamp: dto.timestamp,
            is_self: dto.is_self,
        }
    }
}

impl From<ChatStatusDto> for RoomStatus {
    fn from(dto: ChatStatusDto) -> Self {
        Self {
            status: dto.status,
            custom_text: non_empty(dto.custom_text),
            open_time: non_empty(dto.open_time),
            close_time: non_empty(dto.close_time),
            expected_open_time: non_empty(dto.expected_open_time),
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

/// Decode a named server event.
///
/// # Returns
///
/// * `Ok(Some(event))` - a known event
/// * `Ok(None)` - an event name this client does not handle
/// * `Err(CodecError)` - a known event with a malformed payload
pub fn decode_server_event(
    name: &str,
    data: Option<Value>,
) -> Result<Option<ServerEvent>, CodecError> {
    let data = data.unwrap_or(Value::Null);
    let event = match name {
        event_name::LOGIN_SUCCESS => {
            let dto: LoginSuccessDto = serde_json::from_value(data)?;
            ServerEvent::LoginSuccess {
                user: dto.user.into(),
                messages: dto.messages.into_iter().map(Into::into).collect(),
            }
        }
        event_name::LOGIN_ERROR => ServerEvent::LoginError {
            msg: error_text(data)?,
        },
        event_name::NEW_MESSAGE => {
            ServerEvent::NewMessage(serde_json::from_value::<MessageDto>(data)?.into())
        }
        event_name::SEND_ERROR => ServerEvent::SendError {
            msg: error_text(data)?,
        },
        event_name::ONLINE_COUNT => {
            ServerEvent::OnlineCount(serde_json::from_value::<OnlineCountDto>(data)?.count)
        }
        event_name::CHAT_STATUS => {
            ServerEvent::RoomStatus(serde_json::from_value::<ChatStatusDto>(data)?.into())
        }
        event_name::LOGOUT_SUCCESS => ServerEvent::LogoutSuccess,
        event_name::KICK | event_name::KICKED => ServerEvent::Kicked,
        _ => return Ok(None),
    };
    Ok(Some(event))
}

fn error_text(data: Value) -> Result<String, CodecError> {
    if data.is_null() {
        return Ok(String::new());
    }
    Ok(serde_json::from_value::<ErrorDto>(data)?.msg)
}

/// Encode a client event as its wire name and optional JSON payload.
pub fn encode_client_event(
    event: &ClientEvent,
) -> Result<(&'static str, Option<Value>), serde_json::Error> {
    let encoded = match event {
        ClientEvent::Login { nickname } => (
            event_name::LOGIN,
            Some(serde_json::to_value(LoginRequest {
                nickname: nickname.as_str().to_string(),
            })?),
        ),
        ClientEvent::SendMessage { content } => (
            event_name::SEND_MESSAGE,
            Some(serde_json::to_value(SendMessageRequest {
                content: content.as_str().to_string(),
            })?),
        ),
        ClientEvent::GetStatus => (event_name::GET_STATUS, None),
        ClientEvent::Logout => (event_name::LOGOUT, None),
        ClientEvent::Heartbeat => (event_name::HEARTBEAT, None),
    };
    Ok(encoded)
}
