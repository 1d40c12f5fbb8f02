//! Terminal output and prompts for the admin CLI.

pub mod formatter;
pub mod prompt;

pub use formatter::AdminFormatter;
