//! View model of the chat page.
//!
//! The controller mutates a [`Screen`]; every visible change is also queued as
//! a [`ScreenUpdate`] so a renderer can draw incrementally.

use crate::domain::{ChatMessage, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short-lived text on the single status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenUpdate {
    Notice(Notice),
    /// Message list replaced (login history)
    MessagesReset(Vec<ChatMessage>),
    MessageAppended(ChatMessage),
    OnlineCount(u64),
    UserInfo(Option<User>),
    ComposerVisible(bool),
    NicknameFormVisible(bool),
    Banner(Option<String>),
    /// Character count of the composer input
    InputLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub nickname_form_visible: bool,
    pub composer_visible: bool,
    pub banner: Option<String>,
    pub status_line: Option<Notice>,
    pub messages: Vec<ChatMessage>,
    /// Index of the message scrolled into view
    pub scrolled_to: Option<usize>,
    pub online_count: Option<u64>,
    pub user: Option<User>,
    pub input_length: usize,
    updates: Vec<ScreenUpdate>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            nickname_form_visible: true,
            composer_visible: false,
            banner: None,
            status_line: None,
            messages: Vec::new(),
            scrolled_to: None,
            online_count: None,
            user: None,
            input_length: 0,
            updates: Vec::new(),
        }
    }
}

impl Screen {
    /// Drain the queued updates.
    pub fn take_updates(&mut self) -> Vec<ScreenUpdate> {
        std::mem::take(&mut self.updates)
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.status_line = Some(notice.clone());
        self.updates.push(ScreenUpdate::Notice(notice));
    }

    pub fn reset_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages.clone();
        self.scrolled_to = self.messages.len().checked_sub(1);
        self.updates.push(ScreenUpdate::MessagesReset(messages));
    }

    /// Append and scroll the newest message into view.
    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message.clone());
        self.scrolled_to = Some(self.messages.len() - 1);
        self.updates.push(ScreenUpdate::MessageAppended(message));
    }

    pub fn set_online_count(&mut self, count: u64) {
        self.online_count = Some(count);
        self.updates.push(ScreenUpdate::OnlineCount(count));
    }

    pub fn set_user(&mut self, user: Option<User>) {
        if self.user != user {
            self.user = user.clone();
            self.updates.push(ScreenUpdate::UserInfo(user));
        }
    }

    pub fn set_composer_visible(&mut self, visible: bool) {
        if self.composer_visible != visible {
            self.composer_visible = visible;
            self.updates.push(ScreenUpdate::ComposerVisible(visible));
        }
    }

    pub fn set_nickname_form_visible(&mut self, visible: bool) {
        if self.nickname_form_visible != visible {
            self.nickname_form_visible = visible;
            self.updates.push(ScreenUpdate::NicknameFormVisible(visible));
        }
    }

    pub fn set_banner(&mut self, banner: Option<String>) {
        if self.banner != banner {
            self.banner = banner.clone();
            self.updates.push(ScreenUpdate::Banner(banner));
        }
    }

    pub fn set_input_length(&mut self, length: usize) {
        if self.input_length != length {
            self.input_length = length;
            self.updates.push(ScreenUpdate::InputLength(length));
        }
    }
}
