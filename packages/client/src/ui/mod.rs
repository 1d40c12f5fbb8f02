//! Terminal front end.

pub mod command;
pub mod formatter;
pub mod render;
pub mod renderer;
pub mod runner;

pub use runner::{ClientOptions, run_client};
