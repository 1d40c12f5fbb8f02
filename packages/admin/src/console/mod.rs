//! Admin Console controller and its view model.

mod controller;
mod screen;

pub use controller::{AdminConsole, SAVED_TEXT};
pub use screen::AdminScreen;
