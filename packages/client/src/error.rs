//! Error types for the chat room client.

use thiserror::Error;

/// Local input validation failures.
///
/// The `Display` text is what the status line shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a nickname")]
    EmptyNickname,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message cannot exceed {max} characters")]
    MessageTooLong { max: usize, actual: usize },
}

/// Reasons a send attempt was stopped before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendRejected {
    /// No joined session. Rejected silently.
    #[error("Not joined to the chat room")]
    NotJoined,

    #[error("The chat room is not open")]
    RoomNotOpen,

    /// `retry_in_secs` is kept for logging; the notice text is fixed.
    #[error("Sending too fast, please try again later")]
    RateLimited { retry_in_secs: i64 },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The transport refused the event
    #[error("{0}")]
    Transport(String),
}

/// Reasons a join attempt failed before the login request went out.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Transport-level errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// No connection is open
    #[error("Not connected to the chat server")]
    NotConnected,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection task has already stopped
    #[error("Connection closed")]
    Closed,

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Malformed Engine.IO / Socket.IO frames
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("empty packet")]
    Empty,

    #[error("unknown packet type '{0}'")]
    UnknownPacketType(char),

    #[error("invalid event packet: {0}")]
    InvalidEvent(String),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Terminal input could not be set up
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
