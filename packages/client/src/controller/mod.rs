//! Session/Chat controller and its view model.

mod chat;
mod composer;
mod screen;

pub use chat::{
    ChatController, DEFAULT_CLOSED_TEXT, DEFAULT_SCHEDULED_TEXT, DISCONNECTED_TEXT, KICKED_TEXT,
    LOGGED_OUT_TEXT, WELCOME_TEXT,
};
pub use composer::{Composer, EnterPolicy, KeyAction};
pub use screen::{Notice, NoticeLevel, Screen, ScreenUpdate};
