//! Text rendering of the admin screen.
//!
//! Every record field comes from users or the server, so each one is passed
//! through `chatroom_shared::text::sanitize_line` before it is printed.

use chatroom_shared::text::sanitize_line as clean;

use crate::{
    console::AdminScreen,
    domain::{AdminMessage, BlacklistEntry, ChatConfig, ChatUserRecord, SensitiveWord},
};

const RULE: &str = "============================================================";

/// Admin screen formatter
pub struct AdminFormatter;

impl AdminFormatter {
    pub fn format_config(config: Option<&ChatConfig>) -> String {
        let mut output = Self::heading("Chat room");
        match config {
            None => output.push_str("(not loaded)\n"),
            Some(config) => {
                output.push_str(&format!("status:             {}\n", config.status));
                output.push_str(&format!("open time:          {}\n", clean(&config.open_time)));
                output.push_str(&format!("close time:         {}\n", clean(&config.close_time)));
                output.push_str(&format!("custom text:        {}\n", clean(&config.custom_text)));
                output.push_str(&format!(
                    "expected open time: {}\n",
                    clean(&config.expected_open_time)
                ));
            }
        }
        output
    }

    pub fn format_sensitive_words(words: &[SensitiveWord]) -> String {
        let mut output = Self::heading("Sensitive words");
        if words.is_empty() {
            output.push_str("(none)\n");
        }
        for word in words {
            output.push_str(&format!("{}  {}\n", clean(&word.id), clean(&word.word)));
        }
        output
    }

    pub fn format_blacklist(entries: &[BlacklistEntry]) -> String {
        let mut output = Self::heading("Blacklist");
        if entries.is_empty() {
            output.push_str("(none)\n");
        }
        for entry in entries {
            output.push_str(&format!(
                "{}  {} ({})  {}  {}\n",
                clean(&entry.id),
                clean(&entry.nickname),
                clean(&entry.ip),
                clean(&entry.reason),
                clean(&entry.created_at)
            ));
        }
        output
    }

    pub fn format_messages(messages: &[AdminMessage]) -> String {
        let mut output = Self::heading("Messages");
        if messages.is_empty() {
            output.push_str("(none)\n");
        }
        for message in messages {
            output.push_str(&format!(
                "{}  {}  {}: {}\n",
                clean(&message.id),
                clean(&message.timestamp),
                clean(&message.nickname),
                clean(&message.content)
            ));
        }
        output
    }

    /// One line per user; blacklisted users are flagged instead of offering promotion
    pub fn format_users(users: &[ChatUserRecord]) -> String {
        let mut output = Self::heading("Users");
        if users.is_empty() {
            output.push_str("(none)\n");
        }
        for user in users {
            let flag = if user.is_blacklisted {
                "[blacklisted]"
            } else if user.is_online {
                "[online]"
            } else {
                "[offline]"
            };
            output.push_str(&format!(
                "{}  {} ({})  {}  {}  {}\n",
                clean(&user.id),
                clean(&user.nickname),
                clean(&user.ip),
                clean(&user.last_active_time),
                flag,
                clean(&user.last_msg)
            ));
        }
        output
    }

    pub fn format_screen(screen: &AdminScreen) -> String {
        [
            Self::format_config(screen.config.as_ref()),
            Self::format_sensitive_words(&screen.sensitive_words),
            Self::format_blacklist(&screen.blacklist),
            Self::format_messages(&screen.messages),
            Self::format_users(&screen.users),
        ]
        .concat()
    }

    fn heading(title: &str) -> String {
        format!("\n{}\n{}\n{}\n", RULE, title, RULE)
    }
}
