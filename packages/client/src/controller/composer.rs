//! Message input buffer and the Enter-key policy.

/// What an Enter key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
}

/// `enter_sends`: plain Enter sends and Ctrl+Enter breaks the line.
/// Otherwise the two are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnterPolicy {
    pub enter_sends: bool,
}

impl EnterPolicy {
    pub fn on_enter(&self, ctrl: bool) -> KeyAction {
        if self.enter_sends != ctrl {
            KeyAction::Submit
        } else {
            KeyAction::InsertNewline
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
    policy: EnterPolicy,
}

impl Composer {
    pub fn new(policy: EnterPolicy) -> Self {
        Self {
            text: String::new(),
            policy,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn insert_newline(&mut self) {
        self.text.push('\n');
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Live counter: characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn policy(&self) -> EnterPolicy {
        self.policy
    }

    pub fn set_enter_sends(&mut self, enter_sends: bool) {
        self.policy.enter_sends = enter_sends;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_sends_policy() {
        // テスト項目: Enter 送信モードでは Enter で送信、Ctrl+Enter で改行
        // given (前提条件):
        let policy = EnterPolicy { enter_sends: true };

        // then (期待する結果):
        assert_eq!(policy.on_enter(false), KeyAction::Submit);
        assert_eq!(policy.on_enter(true), KeyAction::InsertNewline);
    }

    #[test]
    fn test_ctrl_enter_sends_policy() {
        // テスト項目: Ctrl+Enter 送信モードでは Enter で改行、Ctrl+Enter で送信
        // given (前提条件):
        let policy = EnterPolicy { enter_sends: false };

        // then (期待する結果):
        assert_eq!(policy.on_enter(false), KeyAction::InsertNewline);
        assert_eq!(policy.on_enter(true), KeyAction::Submit);
    }

    #[test]
    fn test_char_count_counts_characters() {
        // テスト項目: 文字数カウンタはバイト数ではなく文字数を数える
        // given (前提条件):
        let mut composer = Composer::default();

        // when (操作):
        composer.push_str("こんにちは");
        composer.insert_newline();
        composer.push_str("ok");

        // then (期待する結果):
        assert_eq!(composer.char_count(), 8);
        assert_eq!(composer.text(), "こんにちは\nok");

        composer.clear();
        assert_eq!(composer.char_count(), 0);
    }
}
