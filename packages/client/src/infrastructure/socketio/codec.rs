//! Engine.IO v4 / Socket.IO v5 text framing.
//!
//! Over a WebSocket every text frame is one Engine.IO packet: a single type
//! digit followed by its payload. A `message` packet wraps one Socket.IO
//! packet, which is again a type digit, an optional `/namespace,`, an optional
//! ack id and a JSON payload.
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,..}   open
//! 2                                       ping
//! 40                                      connect to "/"
//! 42["new_message",{..}]                  event
//! 41                                      disconnect from "/"
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::CodecError;

/// Engine.IO transport packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    /// Carries an encoded Socket.IO packet
    Message(String),
    Upgrade,
    Noop,
}

/// Payload of the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// Socket.IO packet on the default namespace.
///
/// Packets addressed to other namespaces decode with `namespace` set, so the
/// caller can ignore them.
#[derive(Debug, Clone, PartialEq)]
pub struct SocketPacket {
    pub namespace: String,
    pub kind: SocketPacketKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacketKind {
    Connect,
    Disconnect,
    Event { name: String, data: Option<Value> },
    Ack,
    ConnectError(String),
}

pub const DEFAULT_NAMESPACE: &str = "/";

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, CodecError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        let payload = chars.as_str();
        let packet = match kind {
            '0' => Self::Open(serde_json::from_str(payload)?),
            '1' => Self::Close,
            '2' => Self::Ping(payload.to_string()),
            '3' => Self::Pong(payload.to_string()),
            '4' => Self::Message(payload.to_string()),
            '5' => Self::Upgrade,
            '6' => Self::Noop,
            other => return Err(CodecError::UnknownPacketType(other)),
        };
        Ok(packet)
    }
}

impl SocketPacket {
    pub fn decode(packet: &str) -> Result<Self, CodecError> {
        let mut chars = packet.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        let mut rest = chars.as_str();

        let mut namespace = DEFAULT_NAMESPACE.to_string();
        if rest.starts_with('/') {
            let end = rest.find(',').unwrap_or(rest.len());
            namespace = rest[..end].to_string();
            rest = rest.get(end + 1..).unwrap_or("");
        }

        // ack id
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        rest = &rest[digits..];

        let kind = match kind {
            '0' => SocketPacketKind::Connect,
            '1' => SocketPacketKind::Disconnect,
            '2' => decode_event(rest)?,
            '3' => SocketPacketKind::Ack,
            '4' => SocketPacketKind::ConnectError(connect_error_message(rest)),
            other => return Err(CodecError::UnknownPacketType(other)),
        };
        Ok(Self { namespace, kind })
    }

    pub fn is_default_namespace(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }
}

fn decode_event(payload: &str) -> Result<SocketPacketKind, CodecError> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Array(mut items) = value else {
        return Err(CodecError::InvalidEvent(
            "payload is not an array".to_string(),
        ));
    };
    if items.is_empty() {
        return Err(CodecError::InvalidEvent("missing event name".to_string()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        other => {
            return Err(CodecError::InvalidEvent(format!(
                "event name is not a string: {}",
                other
            )));
        }
    };
    // extra arguments beyond the first are not part of this protocol
    let data = if items.is_empty() {
        None
    } else {
        Some(items.swap_remove(0))
    };
    Ok(SocketPacketKind::Event { name, data })
}

fn connect_error_message(payload: &str) -> String {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(payload)
            .to_string(),
        Ok(Value::String(message)) => message,
        _ => payload.to_string(),
    }
}

/// `40`: join the default namespace.
pub fn encode_connect() -> String {
    "40".to_string()
}

/// `41`: leave the default namespace.
pub fn encode_disconnect() -> String {
    "41".to_string()
}

/// `3<payload>`: answer to a server ping.
pub fn encode_pong(payload: &str) -> String {
    format!("3{}", payload)
}

/// `42["name",data]` or `42["name"]` when there is no payload.
pub fn encode_event(name: &str, data: Option<&Value>) -> Result<String, CodecError> {
    let mut items = vec![Value::String(name.to_string())];
    if let Some(data) = data {
        items.push(data.clone());
    }
    Ok(format!("42{}", serde_json::to_string(&items)?))
}
