//! Chat room client library.
//!
//! The session controller is a plain state machine over an injected
//! [`domain::Transport`], so it can be driven without a live server. The
//! terminal front end in [`ui`] wires it to a Socket.IO WebSocket transport.

// layers
pub mod controller;
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub mod error;

pub use controller::{ChatController, Notice, NoticeLevel, Screen, ScreenUpdate};
pub use error::{ClientError, JoinError, SendRejected, TransportError, ValidationError};
