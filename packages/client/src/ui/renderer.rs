//! Draws screen updates to a terminal stream.

use std::io::{self, Write};

use chatroom_shared::time::local_time_label;

use crate::controller::ScreenUpdate;

use super::formatter::MessageFormatter;

/// Prompt shown by the line editor.
pub const PROMPT: &str = "> ";

/// Default width used to right-align our own messages.
pub const DEFAULT_WIDTH: usize = 72;

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: usize,
    max_chars: usize,
    enter_sends: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: usize, max_chars: usize) -> Self {
        Self {
            out,
            width,
            max_chars,
            enter_sends: true,
        }
    }

    pub fn set_enter_sends(&mut self, enter_sends: bool) {
        self.enter_sends = enter_sends;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw a batch of updates, then put the prompt back.
    pub fn render(&mut self, updates: &[ScreenUpdate]) -> io::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        for update in updates {
            self.draw(update)?;
        }
        self.redisplay_prompt()
    }

    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.redisplay_prompt()
    }

    fn draw(&mut self, update: &ScreenUpdate) -> io::Result<()> {
        let text = match update {
            ScreenUpdate::Notice(notice) => {
                MessageFormatter::format_notice(notice, &local_time_label())
            }
            ScreenUpdate::MessagesReset(messages) => {
                MessageFormatter::format_history(messages, self.width)
            }
            ScreenUpdate::MessageAppended(message) => {
                MessageFormatter::format_message(message, self.width)
            }
            ScreenUpdate::OnlineCount(count) => MessageFormatter::format_online_count(*count),
            ScreenUpdate::UserInfo(Some(user)) => MessageFormatter::format_user_info(user),
            ScreenUpdate::UserInfo(None) => return Ok(()),
            ScreenUpdate::ComposerVisible(true) => {
                MessageFormatter::format_composer_ready(self.enter_sends)
            }
            ScreenUpdate::ComposerVisible(false) => return Ok(()),
            ScreenUpdate::NicknameFormVisible(true) => MessageFormatter::format_nickname_prompt(),
            ScreenUpdate::NicknameFormVisible(false) => return Ok(()),
            ScreenUpdate::Banner(Some(text)) => MessageFormatter::format_banner(text),
            ScreenUpdate::Banner(None) => return Ok(()),
            // the counter only matters while a multi-line draft is pending
            ScreenUpdate::InputLength(0) => return Ok(()),
            ScreenUpdate::InputLength(length) => {
                MessageFormatter::format_input_length(*length, self.max_chars)
            }
        };
        write!(self.out, "{}", text)
    }

    /// Redisplay the prompt after printing output
    fn redisplay_prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}", PROMPT)?;
        self.out.flush()
    }
}
