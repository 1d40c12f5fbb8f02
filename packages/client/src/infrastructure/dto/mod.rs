//! Data Transfer Objects (DTOs) for the chat event channel.
//!
//! - `socket`: JSON payloads of each event
//! - `conversion`: mapping between named events and domain events

pub mod conversion;
pub mod socket;
