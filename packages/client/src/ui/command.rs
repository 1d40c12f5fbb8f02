//! Terminal input lines mapped to controller operations.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join(String),
    /// A line typed into the composer (the Enter key)
    Line(String),
    /// Submit the draft (Ctrl+Enter)
    Send,
    EnterSends(bool),
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// A plain line is a nickname while the nickname form is showing and
    /// composer input otherwise.
    pub fn parse(line: &str, nickname_form_visible: bool) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return if nickname_form_visible {
                Self::Join(trimmed.to_string())
            } else {
                Self::Line(line.to_string())
            };
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };
        match name {
            "join" => Self::Join(argument.to_string()),
            "send" => Self::Send,
            "enter" => match argument {
                "on" => Self::EnterSends(true),
                "off" => Self::EnterSends(false),
                _ => Self::Unknown(trimmed.to_string()),
            },
            "logout" => Self::Logout,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}
