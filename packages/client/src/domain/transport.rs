//! Transport seam between the controller and the network.
//!
//! The controller depends only on this interface. The WebSocket implementation
//! lives in the infrastructure layer; tests inject fakes.

use crate::error::TransportError;

use super::event::{ClientEvent, ServerEvent};

/// Local handle of one transport connection.
///
/// A fresh id is issued on every `open`, so signals from a replaced
/// connection can be told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Event(ServerEvent),
    /// The connection ended (network failure, server close, or our own close).
    Closed { reason: String },
}

/// A signal tagged with the connection it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub connection: ConnectionId,
    pub signal: Signal,
}

impl Inbound {
    pub fn event(connection: ConnectionId, event: ServerEvent) -> Self {
        Self {
            connection,
            signal: Signal::Event(event),
        }
    }

    pub fn closed(connection: ConnectionId, reason: impl Into<String>) -> Self {
        Self {
            connection,
            signal: Signal::Closed {
                reason: reason.into(),
            },
        }
    }
}

/// Bidirectional event channel to the chat server.
///
/// All methods are non-blocking: `open` starts connecting in the background and
/// `emit` queues the event. Server events come back as [`Inbound`] values on a
/// channel owned by whoever drives the controller.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Open a new connection, replacing any current one.
    fn open(&mut self) -> Result<ConnectionId, TransportError>;

    /// Queue an event on the current connection.
    fn emit(&mut self, event: ClientEvent) -> Result<(), TransportError>;

    /// Close the current connection, if any.
    fn close(&mut self);
}
