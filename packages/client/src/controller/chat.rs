//! Session/Chat controller.
//!
//! One `ChatController` owns the whole participant lifecycle: the transport
//! connection, the session state machine, the last-known room status and the
//! screen. It is driven from a single event loop, so no method ever blocks
//! and no state is shared.
//!
//! ```text
//! Anonymous ──join──▶ Joining ──login_success──▶ Joined
//!     ▲                  │                          │
//!     └──login_error─────┘        logout / logout_success
//!     ▲                                             │
//!     └─────────────────────────────────────────────┘
//! Joined ──kick──▶ Kicked          Joining|Joined ──transport lost──▶ Disconnected
//! ```

use chatroom_shared::{ChatStatus, time::Clock};

use crate::{
    domain::{
        ChatMessage, ClientEvent, ConnectionId, Inbound, MessageContent, Nickname, RoomStatus,
        ServerEvent, Session, SessionConfig, SessionState, Signal, Transport, User,
        session::{cooldown_secs, remaining_cooldown},
    },
    error::{JoinError, SendRejected},
};

use super::{
    composer::{Composer, EnterPolicy, KeyAction},
    screen::{Notice, Screen, ScreenUpdate},
};

pub const DEFAULT_CLOSED_TEXT: &str = "The chat room is closed";
pub const DEFAULT_SCHEDULED_TEXT: &str = "The chat room is only open during scheduled hours";
pub const WELCOME_TEXT: &str = "Welcome to the chat room";
pub const LOGGED_OUT_TEXT: &str = "You have left the chat room";
pub const KICKED_TEXT: &str = "You have been kicked or banned from the chat room";
pub const DISCONNECTED_TEXT: &str = "Disconnected from the chat server";

pub struct ChatController<T: Transport, C: Clock> {
    transport: T,
    clock: C,
    config: SessionConfig,
    /// Present while a transport connection is held
    connection: Option<ConnectionId>,
    state: SessionState,
    room: RoomStatus,
    /// Clock reading of the most recent accepted send
    last_send_at: Option<i64>,
    composer: Composer,
    screen: Screen,
}

impl<T: Transport, C: Clock> ChatController<T, C> {
    pub fn new(transport: T, clock: C, config: SessionConfig) -> Self {
        Self {
            transport,
            clock,
            config,
            connection: None,
            state: SessionState::Anonymous,
            room: RoomStatus::default(),
            last_send_at: None,
            composer: Composer::new(EnterPolicy { enter_sends: true }),
            screen: Screen::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn room_status(&self) -> &RoomStatus {
        &self.room
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    pub fn is_kicked(&self) -> bool {
        self.state.is_kicked()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Drain the screen updates produced since the last call.
    pub fn take_updates(&mut self) -> Vec<ScreenUpdate> {
        self.screen.take_updates()
    }

    // ========================================
    // User operations
    // ========================================

    /// Open a connection and request login under `raw_nickname`.
    ///
    /// A blank nickname is rejected locally without touching the network.
    /// Success is not assumed: the state stays `Joining` until the server
    /// answers, with no client-side timeout.
    pub fn join(&mut self, raw_nickname: &str) -> Result<ConnectionId, JoinError> {
        let nickname = match Nickname::parse(raw_nickname) {
            Ok(nickname) => nickname,
            Err(e) => {
                self.screen.show_notice(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        // a fresh join replaces any previous connection and clears a kick
        self.drop_connection();
        self.state = SessionState::Anonymous;

        let connection = match self.transport.open() {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!("Failed to open connection: {}", e);
                self.screen.show_notice(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };
        self.connection = Some(connection);

        if let Err(e) = self.transport.emit(ClientEvent::Login {
            nickname: nickname.clone(),
        }) {
            tracing::warn!("Failed to send login request: {}", e);
            self.drop_connection();
            self.screen.show_notice(Notice::error(e.to_string()));
            return Err(e.into());
        }

        tracing::info!(
            "Joining as '{}' on connection #{}",
            nickname,
            connection.value()
        );
        self.state = SessionState::Joining { nickname };
        Ok(connection)
    }

    /// Send `raw_content` after the optimistic local checks.
    ///
    /// Checks run in order and the first failure wins: joined, room open,
    /// rate limit, non-empty, length. Every failure except "not joined" is
    /// shown on the status line. Nothing is emitted on failure.
    pub fn send(&mut self, raw_content: &str) -> Result<(), SendRejected> {
        if self.connection.is_none() || !self.state.is_joined() {
            return Err(SendRejected::NotJoined);
        }
        if !self.room.is_open() {
            return self.reject(SendRejected::RoomNotOpen);
        }

        let now = self.clock.now_millis();
        if let Some(remaining) =
            remaining_cooldown(self.last_send_at, now, self.config.send_interval_ms)
        {
            let retry_in_secs = cooldown_secs(remaining);
            tracing::debug!("Send rate limited, {}s left in the window", retry_in_secs);
            return self.reject(SendRejected::RateLimited { retry_in_secs });
        }

        let content = match MessageContent::parse(raw_content, self.config.max_message_chars) {
            Ok(content) => content,
            Err(e) => return self.reject(e.into()),
        };

        if let Err(e) = self.transport.emit(ClientEvent::SendMessage { content }) {
            tracing::warn!("Failed to send message: {}", e);
            return self.reject(SendRejected::Transport(e.to_string()));
        }

        self.last_send_at = Some(now);
        self.composer.clear();
        self.screen.set_input_length(0);
        Ok(())
    }

    /// Send whatever is in the composer.
    pub fn send_composed(&mut self) -> Result<(), SendRejected> {
        let text = self.composer.text().to_string();
        self.send(&text)
    }

    /// Emit a heartbeat if the session is live.
    ///
    /// # Returns
    ///
    /// `true` if a heartbeat was emitted
    pub fn heartbeat(&mut self) -> bool {
        if self.connection.is_none() || !self.state.is_joined() {
            return false;
        }
        match self.transport.emit(ClientEvent::Heartbeat) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send heartbeat: {}", e);
                false
            }
        }
    }

    /// Leave the room without waiting for the server.
    pub fn logout(&mut self) {
        if let Some(connection) = self.connection.take() {
            if let Err(e) = self.transport.emit(ClientEvent::Logout) {
                tracing::warn!("Failed to send logout request: {}", e);
            }
            self.transport.close();
            tracing::info!("Logged out, closed connection #{}", connection.value());
        }
        self.revert_to_nickname_entry();
        self.screen.show_notice(Notice::success(LOGGED_OUT_TEXT));
    }

    // ========================================
    // Composer
    // ========================================

    pub fn type_text(&mut self, text: &str) {
        self.composer.push_str(text);
        self.screen.set_input_length(self.composer.char_count());
    }

    /// Apply the Enter-key policy: submit the composer or break the line.
    pub fn press_enter(&mut self, ctrl: bool) -> KeyAction {
        let action = self.composer.policy().on_enter(ctrl);
        match action {
            KeyAction::Submit => {
                // rejections are already on the status line
                let _ = self.send_composed();
            }
            KeyAction::InsertNewline => {
                self.composer.insert_newline();
                self.screen.set_input_length(self.composer.char_count());
            }
        }
        action
    }

    pub fn set_enter_sends(&mut self, enter_sends: bool) {
        self.composer.set_enter_sends(enter_sends);
    }

    /// Throw away the current draft.
    pub fn discard_draft(&mut self) {
        self.composer.clear();
        self.screen.set_input_length(0);
    }

    // ========================================
    // Server signals
    // ========================================

    /// Apply one inbound signal. Signals from a replaced connection are dropped.
    pub fn handle(&mut self, inbound: Inbound) {
        if self.connection != Some(inbound.connection) {
            tracing::debug!(
                "Dropping signal from stale connection #{}",
                inbound.connection.value()
            );
            return;
        }
        match inbound.signal {
            Signal::Event(event) => self.apply_event(event),
            Signal::Closed { reason } => self.on_connection_lost(reason),
        }
    }

    fn apply_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::LoginSuccess { user, messages } => self.on_login_success(user, messages),
            ServerEvent::LoginError { msg } => self.on_login_error(msg),
            ServerEvent::NewMessage(message) => {
                let current = self.state.user().map(|user| user.id.clone());
                self.screen
                    .append_message(message.relative_to(current.as_deref()));
            }
            ServerEvent::SendError { msg } => self.screen.show_notice(Notice::error(msg)),
            ServerEvent::OnlineCount(count) => self.screen.set_online_count(count),
            ServerEvent::RoomStatus(status) => {
                tracing::debug!("Room status is now {}", status.status);
                self.room = status;
                self.apply_room_gate();
            }
            ServerEvent::LogoutSuccess => {
                tracing::info!("Server confirmed logout");
                self.revert_to_nickname_entry();
                self.screen.show_notice(Notice::success(LOGGED_OUT_TEXT));
            }
            ServerEvent::Kicked => self.on_kicked(),
        }
    }

    fn on_login_success(&mut self, user: User, messages: Vec<ChatMessage>) {
        tracing::info!("Joined as '{}' ({})", user.nickname, user.id);
        let messages = messages
            .into_iter()
            .map(|message| message.relative_to(Some(&user.id)))
            .collect();

        self.state = SessionState::Joined(Session { user: user.clone() });
        self.screen.set_nickname_form_visible(false);
        self.screen.set_composer_visible(true);
        self.screen.reset_messages(messages);
        self.screen.set_user(Some(user));
        self.screen.show_notice(Notice::success(WELCOME_TEXT));

        if let Err(e) = self.transport.emit(ClientEvent::GetStatus) {
            tracing::warn!("Failed to request room status: {}", e);
        }
    }

    fn on_login_error(&mut self, msg: String) {
        tracing::info!("Login rejected: {}", msg);
        self.drop_connection();
        self.state = SessionState::Anonymous;
        self.screen.set_composer_visible(false);
        self.screen.set_nickname_form_visible(true);
        self.screen.show_notice(Notice::error(msg));
    }

    fn on_kicked(&mut self) {
        tracing::warn!("Kicked by the server");
        self.state = SessionState::Kicked;
        self.screen.show_notice(Notice::error(KICKED_TEXT));
        self.screen.set_composer_visible(false);
        self.screen.set_nickname_form_visible(true);
    }

    fn on_connection_lost(&mut self, reason: String) {
        self.connection = None;
        self.transport.close();
        match self.state {
            SessionState::Joining { .. } | SessionState::Joined(_) => {
                tracing::warn!("Connection lost: {}", reason);
                self.state = SessionState::Disconnected {
                    reason: reason.clone(),
                };
                self.screen.set_composer_visible(false);
                self.screen.set_nickname_form_visible(true);
                self.screen
                    .show_notice(Notice::error(format!("{} ({})", DISCONNECTED_TEXT, reason)));
            }
            _ => tracing::debug!(
                "Connection closed while {}: {}",
                self.state.label(),
                reason
            ),
        }
    }

    /// Re-derive composer visibility and banner from the last-known status.
    ///
    /// `Scheduled` hides the composer exactly like `Closed`. The composer is
    /// only ever revealed for a joined session, so a kicked client stays hidden.
    fn apply_room_gate(&mut self) {
        let banner = match self.room.status {
            ChatStatus::Closed => Some(self.banner_text(DEFAULT_CLOSED_TEXT)),
            ChatStatus::Scheduled => Some(self.banner_text(DEFAULT_SCHEDULED_TEXT)),
            ChatStatus::Open => None,
        };
        match banner {
            Some(text) => {
                self.screen.set_composer_visible(false);
                self.screen.set_banner(Some(text));
            }
            None => {
                self.screen.set_banner(None);
                if self.state.is_joined() {
                    self.screen.set_composer_visible(true);
                }
            }
        }
    }

    fn banner_text(&self, default: &str) -> String {
        self.room
            .custom_text
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    fn revert_to_nickname_entry(&mut self) {
        self.state = SessionState::Anonymous;
        self.screen.set_user(None);
        self.screen.set_composer_visible(false);
        self.screen.set_nickname_form_visible(true);
    }

    fn drop_connection(&mut self) {
        if self.connection.take().is_some() {
            self.transport.close();
        }
    }

    fn reject(&mut self, rejected: SendRejected) -> Result<(), SendRejected> {
        self.screen.show_notice(Notice::error(rejected.to_string()));
        Err(rejected)
    }
}
