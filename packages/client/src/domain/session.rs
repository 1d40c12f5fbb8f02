//! Session lifecycle states and the client-side timing rules.

use std::time::Duration;

use super::{entity::User, value_object::Nickname};

/// Minimum gap between two accepted sends (milliseconds).
pub const SEND_INTERVAL_MS: i64 = 10_000;
/// Heartbeat period (milliseconds).
pub const HEARTBEAT_INTERVAL_MS: u64 = 10_000;
/// Maximum message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Tunables for the optimistic client-side guards.
///
/// These are UX hints only; the server enforces its own limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub send_interval_ms: i64,
    pub heartbeat_interval: Duration,
    pub max_message_chars: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: SEND_INTERVAL_MS,
            heartbeat_interval: Duration::from_millis(HEARTBEAT_INTERVAL_MS),
            max_message_chars: MAX_MESSAGE_CHARS,
        }
    }
}

/// A joined session. Created on login success, dropped on logout or kick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nickname entry, no session
    #[default]
    Anonymous,
    /// Login request sent, waiting for the server's answer
    Joining { nickname: Nickname },
    Joined(Session),
    /// Forced off by the server
    Kicked,
    /// Transport dropped without a logout or kick
    Disconnected { reason: String },
}

impl SessionState {
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Joined(_))
    }

    pub fn is_kicked(&self) -> bool {
        matches!(self, Self::Kicked)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Joined(session) => Some(&session.user),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Joining { .. } => "joining",
            Self::Joined(_) => "joined",
            Self::Kicked => "kicked",
            Self::Disconnected { .. } => "disconnected",
        }
    }
}

/// Remaining cooldown before another send is allowed.
///
/// # Returns
///
/// `Some(ms)` while the window since `last_send_at` is still open,
/// `None` once sending is allowed again (or nothing was sent yet).
pub fn remaining_cooldown(last_send_at: Option<i64>, now: i64, interval_ms: i64) -> Option<i64> {
    let last = last_send_at?;
    let elapsed = now - last;
    if elapsed < interval_ms {
        Some(interval_ms - elapsed)
    } else {
        None
    }
}

/// Round a millisecond cooldown up to whole seconds for display.
pub fn cooldown_secs(remaining_ms: i64) -> i64 {
    (remaining_ms + 999) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_cooldown_without_previous_send() {
        // テスト項目: 未送信の場合はクールダウンが無い
        // then (期待する結果):
        assert_eq!(remaining_cooldown(None, 0, SEND_INTERVAL_MS), None);
    }

    #[test]
    fn test_remaining_cooldown_inside_window() {
        // テスト項目: 送信間隔内ではクールダウンの残り時間が返される
        // when (操作):
        let remaining = remaining_cooldown(Some(1_000), 4_000, SEND_INTERVAL_MS);

        // then (期待する結果):
        assert_eq!(remaining, Some(7_000));
    }

    #[test]
    fn test_remaining_cooldown_at_exact_boundary() {
        // テスト項目: ちょうど 10000 ms 経過した時点で送信可能になる
        // when (操作):
        let at_boundary = remaining_cooldown(Some(1_000), 11_000, SEND_INTERVAL_MS);
        let just_before = remaining_cooldown(Some(1_000), 10_999, SEND_INTERVAL_MS);

        // then (期待する結果):
        assert_eq!(at_boundary, None);
        assert_eq!(just_before, Some(1));
    }

    #[test]
    fn test_cooldown_secs_rounds_up() {
        // テスト項目: 残り時間の秒数表示は切り上げられる
        // then (期待する結果):
        assert_eq!(cooldown_secs(7_000), 7);
        assert_eq!(cooldown_secs(6_001), 7);
        assert_eq!(cooldown_secs(1), 1);
    }

    #[test]
    fn test_session_state_user_only_when_joined() {
        // テスト項目: ユーザー情報は joined 状態でのみ取得できる
        // given (前提条件):
        let user = User {
            id: "u1".to_string(),
            nickname: "Alice".to_string(),
            avatar: "1.png".to_string(),
            gender: "unknown".to_string(),
            is_online: true,
        };
        let joined = SessionState::Joined(Session { user: user.clone() });

        // then (期待する結果):
        assert_eq!(joined.user(), Some(&user));
        assert_eq!(SessionState::Kicked.user(), None);
        assert!(SessionState::Kicked.is_kicked());
        assert_eq!(joined.label(), "joined");
    }
}
