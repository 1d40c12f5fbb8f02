//! View model of the admin page: the config form and one list per resource.

use crate::domain::{AdminMessage, BlacklistEntry, ChatConfig, ChatUserRecord, SensitiveWord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminScreen {
    /// `None` until the first load
    pub config: Option<ChatConfig>,
    pub sensitive_words: Vec<SensitiveWord>,
    pub blacklist: Vec<BlacklistEntry>,
    pub messages: Vec<AdminMessage>,
    pub users: Vec<ChatUserRecord>,
}
