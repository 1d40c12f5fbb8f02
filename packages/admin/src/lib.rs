//! Chat room admin console library.
//!
//! [`console::AdminConsole`] drives the request/response admin endpoints
//! through an injected [`domain::AdminApi`] and keeps the rendered lists in
//! an [`console::AdminScreen`].

// layers
pub mod console;
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub mod error;

pub use console::{AdminConsole, AdminScreen, SAVED_TEXT};
pub use error::AdminError;
