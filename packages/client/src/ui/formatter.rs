//! Message formatting utilities for the terminal chat view.

use crate::{
    controller::{Notice, NoticeLevel},
    domain::{ChatMessage, User},
};

use chatroom_shared::text::sanitize_line;

use super::render::render_content;

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Short marker for an avatar file name: `"3.png"` becomes `[3]`.
    pub fn avatar_marker(avatar: &str) -> String {
        let stem = avatar
            .rsplit('/')
            .next()
            .and_then(|name| name.split('.').next())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("?");
        format!("[{}]", sanitize_line(stem))
    }

    /// Format a chat message
    ///
    /// Others' messages are left-aligned with the avatar marker on the left;
    /// our own are right-aligned to `width` with the marker on the right.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to format
    /// * `width` - Terminal width used for right alignment
    ///
    /// # Returns
    ///
    /// A formatted string ending with a newline
    pub fn format_message(message: &ChatMessage, width: usize) -> String {
        let marker = Self::avatar_marker(&message.avatar);
        let nickname = sanitize_line(&message.nickname);
        let timestamp = sanitize_line(&message.timestamp);
        let content = render_content(&message.content);
        let mut output = String::new();

        if message.is_self {
            let header = format!("{} @{} {}", timestamp, nickname, marker);
            output.push_str(&format!("{:>width$}\n", header, width = width));
            for line in content.lines() {
                output.push_str(&format!("{:>width$}\n", line, width = width));
            }
        } else {
            output.push_str(&format!("{} @{} {}\n", marker, nickname, timestamp));
            for line in content.lines() {
                output.push_str(&format!("    {}\n", line));
            }
        }
        output
    }

    /// Format the login history, oldest first.
    pub fn format_history(messages: &[ChatMessage], width: usize) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        }
        for message in messages {
            output.push_str(&Self::format_message(message, width));
        }
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format a status-line notice stamped with the local time it was shown
    pub fn format_notice(notice: &Notice, time_label: &str) -> String {
        let mark = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
        };
        format!("[{}] {} {}\n", time_label, mark, sanitize_line(&notice.text))
    }

    /// Format the room status banner shown while the composer is hidden
    pub fn format_banner(text: &str) -> String {
        format!("\n*** {} ***\n", sanitize_line(text))
    }

    pub fn format_online_count(count: u64) -> String {
        format!("Online: {}\n", count)
    }

    pub fn format_user_info(user: &User) -> String {
        format!(
            "You are @{} {} ({})\n",
            sanitize_line(&user.nickname),
            Self::avatar_marker(&user.avatar),
            sanitize_line(&user.gender)
        )
    }

    /// Live character counter of a multi-line draft
    pub fn format_input_length(length: usize, max: usize) -> String {
        format!("({}/{} characters)\n", length, max)
    }

    pub fn format_nickname_prompt() -> String {
        "Enter a nickname to join the chat room.\n".to_string()
    }

    pub fn format_composer_ready(enter_sends: bool) -> String {
        if enter_sends {
            "Type a message and press Enter to send. /help lists commands.\n".to_string()
        } else {
            "Type a message; each line is added to the draft, /send sends it. /help lists commands.\n"
                .to_string()
        }
    }

    pub fn format_help() -> String {
        [
            "Commands:",
            "  /join <nickname>  join the chat room",
            "  /send             send the current draft",
            "  /enter on|off     Enter sends (on) or adds a line to the draft (off)",
            "  /logout           leave the chat room",
            "  /quit             exit",
            "",
        ]
        .join("\n")
    }
}
