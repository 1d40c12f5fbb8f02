//! Error types for the admin console.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    /// Rejected locally before any request
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AdminError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
