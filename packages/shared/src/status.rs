//! Chat room status gate.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-declared gate on whether sending is currently permitted.
///
/// Encoded on the wire as an integer: `0` closed, `1` open, `2` scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ChatStatus {
    Closed,
    #[default]
    Open,
    /// Open only inside the configured time window.
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chat status value: {0}")]
pub struct UnknownChatStatus(pub i64);

impl TryFrom<i64> for ChatStatus {
    type Error = UnknownChatStatus;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Closed),
            1 => Ok(Self::Open),
            2 => Ok(Self::Scheduled),
            other => Err(UnknownChatStatus(other)),
        }
    }
}

impl From<ChatStatus> for i64 {
    fn from(status: ChatStatus) -> Self {
        match status {
            ChatStatus::Closed => 0,
            ChatStatus::Open => 1,
            ChatStatus::Scheduled => 2,
        }
    }
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Scheduled => "scheduled",
        };
        f.write_str(label)
    }
}
