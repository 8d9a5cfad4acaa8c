//! Chat view state machine.
//!
//! This module defines [`ChatView`], which binds the channel to the derived
//! view state, completely decoupled from I/O and timers.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks session status and re-announces itself (`join`) on every connect.
//! - Appends delivered messages and replaces the member snapshot.
//! - Keeps per-member typing flags as plain state, rendered like the rest.
//! - Turns composer keystrokes into `typing` emissions and debounce timer
//!   requests, and form submission into `message` emissions.
//! - Owns teardown: after logout or quit every further event is ignored.

use texchat_proto::{Member, Message, Outbound};

use crate::{
    AppAction, AppEvent, Composer, ConnectionStatus, EMOJI_COLUMNS, EmojiPicker, Field, KeyInput,
    Route, TimerToken, TypingIndicators, ViewConfig, line,
};

/// Messages moved per PageUp/PageDown.
const SCROLL_PAGE: usize = 5;

/// Chat view state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a channel or terminal.
#[derive(Debug, Clone)]
pub struct ChatView {
    /// Current user's display name (from the route).
    username: String,
    config: ViewConfig,
    /// Session status.
    status: ConnectionStatus,
    /// Channel id of the current connection. `None` before the first connect.
    self_id: Option<String>,
    /// Latest member snapshot, in server order.
    members: Vec<Member>,
    /// Delivered messages, in arrival order.
    messages: Vec<Message>,
    typing: TypingIndicators,
    composer: Composer,
    /// Token of the armed typing timer. `None` if no timer is pending.
    typing_timer: Option<TimerToken>,
    next_token: u64,
    emoji: EmojiPicker,
    /// Transient notice for recoverable errors. `None` if no notice.
    notice: Option<String>,
    /// Messages hidden below the bottom of the thread. Zero follows new
    /// messages.
    scroll_offset: usize,
    /// Set once the channel is closed; subscriptions are revoked.
    torn_down: bool,
}

impl ChatView {
    /// Create a view for `username` with default configuration.
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_config(username, ViewConfig::default())
    }

    /// Create a view for `username`.
    pub fn with_config(username: impl Into<String>, config: ViewConfig) -> Self {
        Self {
            username: username.into(),
            config,
            status: ConnectionStatus::Connecting,
            self_id: None,
            members: Vec::new(),
            messages: Vec::new(),
            typing: TypingIndicators::default(),
            composer: Composer::default(),
            typing_timer: None,
            next_token: 0,
            emoji: EmojiPicker::default(),
            notice: None,
            scroll_offset: 0,
            torn_down: false,
        }
    }

    /// Process an event and return actions.
    ///
    /// After teardown every event is dropped: the view has released its
    /// subscriptions and must not change anymore.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        if self.torn_down {
            tracing::debug!(?event, "event after teardown dropped");
            return vec![];
        }

        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Connected { channel_id } => {
                self.status = ConnectionStatus::Online;
                self.notice = None;
                self.self_id = Some(channel_id.clone());
                let join = Outbound::Join { self_id: channel_id, username: self.username.clone() };
                vec![AppAction::Emit(join), AppAction::Render]
            },
            AppEvent::Disconnected => {
                self.status = ConnectionStatus::Offline;
                vec![AppAction::Render]
            },
            AppEvent::MessageReceived(message) => {
                self.messages.push(message);
                if self.scroll_offset > 0 {
                    self.scroll_offset += 1;
                }
                vec![AppAction::Render]
            },
            AppEvent::MembersJoined(members) => {
                self.typing.retain_members(&members);
                self.members = members;
                vec![AppAction::Render]
            },
            AppEvent::TypingStatus { member_id, is_typing } => {
                self.typing.set(member_id, is_typing);
                vec![AppAction::Render]
            },
            AppEvent::TypingTimerElapsed { token } => {
                if self.typing_timer != Some(token) {
                    tracing::trace!(?token, "stale typing timer ignored");
                    return vec![];
                }
                self.typing_timer = None;
                self.typing_signal(false)
            },
            AppEvent::ChannelError { message } => {
                self.notice = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle keyboard input.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.emoji.is_open() {
            return self.handle_picker_key(key);
        }

        match key {
            KeyInput::Ctrl('e') => self.toggle_emoji_picker(),
            KeyInput::Ctrl('c') => self.quit(),
            KeyInput::Ctrl(_) => vec![],
            KeyInput::Esc => self.logout(),
            KeyInput::Tab => {
                self.composer.toggle_focus();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.submit(),
            KeyInput::PageUp => {
                self.scroll_offset = (self.scroll_offset + SCROLL_PAGE).min(self.messages.len());
                vec![AppAction::Render]
            },
            KeyInput::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_PAGE);
                vec![AppAction::Render]
            },
            _ => {
                self.composer.focused_mut().edit(key);
                let mut actions = match self.composer.focus {
                    Field::Message => self.on_composer_keystroke(),
                    Field::Recipient => vec![],
                };
                actions.push(AppAction::Render);
                actions
            },
        }
    }

    /// Keys while the emoji overlay is open.
    fn handle_picker_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let columns = EMOJI_COLUMNS as isize;
        match key {
            KeyInput::Left => self.emoji.move_by(-1),
            KeyInput::Right => self.emoji.move_by(1),
            KeyInput::Up => self.emoji.move_by(-columns),
            KeyInput::Down => self.emoji.move_by(columns),
            KeyInput::Enter => {
                let chosen = self.emoji.current();
                return self.handle_emoji_selection(chosen);
            },
            KeyInput::Esc | KeyInput::Ctrl('e') => self.emoji.close(),
            KeyInput::Ctrl('c') => return self.quit(),
            _ => return vec![],
        }
        vec![AppAction::Render]
    }

    /// Form submission. From the message field the Enter keystroke first
    /// stops the typing signal.
    fn submit(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::new();
        if self.composer.focus == Field::Message {
            actions.extend(self.typing_signal(false));
            if self.typing_timer.take().is_some() {
                actions.push(AppAction::CancelTypingTimer);
            }
        }
        actions.extend(self.send_message());
        actions
    }

    /// Non-Enter keystroke in the message field.
    ///
    /// Signals typing and re-arms the debounce timer so a burst of keystrokes
    /// ends in a single trailing `typing(false)`.
    pub fn on_composer_keystroke(&mut self) -> Vec<AppAction> {
        let mut actions = self.typing_signal(true);
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.typing_timer = Some(token);
        actions.push(AppAction::ArmTypingTimer { token, after: self.config.typing_idle });
        actions
    }

    /// Send the composed message to the recipient field's name.
    ///
    /// Empty messages are sendable. The recipient field is kept; the message
    /// field is cleared. The message only appears once the channel echoes it.
    pub fn send_message(&mut self) -> Vec<AppAction> {
        let body = self.composer.message.take();
        let receiver = self.composer.recipient.text().to_string();
        tracing::debug!(receiver = %receiver, len = body.len(), "sending message");
        vec![
            AppAction::Emit(Outbound::Message { username: self.username.clone(), receiver, body }),
            AppAction::Render,
        ]
    }

    /// Flip emoji overlay visibility.
    pub fn toggle_emoji_picker(&mut self) -> Vec<AppAction> {
        self.emoji.toggle();
        vec![AppAction::Render]
    }

    /// Append the chosen emoji to the message and close the overlay.
    pub fn handle_emoji_selection(&mut self, chosen: &str) -> Vec<AppAction> {
        self.composer.message.append(chosen);
        self.emoji.close();
        vec![AppAction::Render]
    }

    /// Log out: close the channel and navigate to the root route.
    ///
    /// The viewer's own entries are dropped from the member list. Calling this
    /// again is a no-op.
    pub fn logout(&mut self) -> Vec<AppAction> {
        if self.torn_down {
            return vec![];
        }
        let username = &self.username;
        self.members.retain(|member| &member.receiver != username);

        let mut actions = self.teardown();
        actions.push(AppAction::Navigate(Route::Root));
        actions
    }

    /// Quit without navigating.
    pub fn quit(&mut self) -> Vec<AppAction> {
        let mut actions = self.teardown();
        actions.push(AppAction::Quit);
        actions
    }

    /// Release the channel and the pending timer. Idempotent.
    pub fn teardown(&mut self) -> Vec<AppAction> {
        if self.torn_down {
            return vec![];
        }
        self.torn_down = true;
        self.emoji.close();

        let mut actions = Vec::new();
        if self.typing_timer.take().is_some() {
            actions.push(AppAction::CancelTypingTimer);
        }
        actions.push(AppAction::CloseChannel);
        actions
    }

    /// `typing` emission for this connection. Empty before the first connect.
    fn typing_signal(&self, is_typing: bool) -> Vec<AppAction> {
        self.self_id
            .as_ref()
            .map(|id| vec![AppAction::Emit(Outbound::typing(is_typing, id.clone()))])
            .unwrap_or_default()
    }

    /// Current user's display name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Session status.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Channel id of the current connection. `None` before the first connect.
    pub fn self_id(&self) -> Option<&str> {
        self.self_id.as_deref()
    }

    /// Latest member snapshot.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Delivered messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Typing flags by member id.
    pub fn typing(&self) -> &TypingIndicators {
        &self.typing
    }

    /// Composer state.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Emoji overlay state.
    pub fn emoji_picker(&self) -> &EmojiPicker {
        &self.emoji
    }

    /// Token of the armed typing timer. `None` if none is pending.
    pub fn pending_typing_timer(&self) -> Option<TimerToken> {
        self.typing_timer
    }

    /// Transient notice. `None` if no notice.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Messages scrolled out below the bottom of the thread.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// True once the view has released the channel.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Rendered message lines in arrival order.
    pub fn message_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.messages
            .iter()
            .map(|m| line::message_line(m, &self.username, self.config.private_label))
    }

    /// Rendered member lines in snapshot order.
    pub fn member_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.members.iter().map(|m| line::member_line(m, self.status, &self.typing))
    }
}
