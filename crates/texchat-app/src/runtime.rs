//! Generic runtime for chat orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`ChatView`]: view state machine
//! - [`Bridge`]: wire contract translation
//! - [`Driver`]: platform-specific I/O
//!
//! It also owns the typing-debounce deadline. Only one deadline exists at a
//! time; arming replaces it, so a burst of keystrokes can never produce more
//! than one trailing `typing(false)`.

use std::collections::VecDeque;

use tokio::time::Instant;

use crate::{AppAction, AppEvent, Bridge, ChatView, Driver, DriverEvent, Route, TimerToken};

/// Why the runtime stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// User logged out; the caller should show the root route.
    LoggedOut,
    /// User quit, or the driver ran out of events.
    Quit,
}

/// Next thing the loop has to react to.
enum Step {
    Driver(Option<DriverEvent>),
    TimerElapsed(TimerToken),
}

/// Generic runtime that orchestrates ChatView, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    view: ChatView,
    bridge: Bridge,
    typing_deadline: Option<(Instant, TimerToken)>,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime around an existing view.
    pub fn new(driver: D, view: ChatView) -> Self {
        Self { driver, view, bridge: Bridge::new(), typing_deadline: None }
    }

    /// Run the event loop until logout or quit.
    ///
    /// This is the core orchestration loop that:
    /// 1. Renders and opens the channel
    /// 2. Races driver events against the typing deadline
    /// 3. Feeds events to the view and executes the resulting actions
    /// 4. Sends outgoing frames through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to render, connect or poll.
    /// Send failures are not errors; they surface as a notice.
    pub async fn run(&mut self) -> Result<Outcome, D::Error> {
        self.driver.render(&self.view)?;
        self.driver.connect().await?;

        let outcome = loop {
            let actions = match self.next_step().await? {
                Step::Driver(Some(event)) => self.dispatch(event),
                Step::Driver(None) => {
                    tracing::info!("driver closed, quitting");
                    self.view.quit()
                },
                Step::TimerElapsed(token) => {
                    self.typing_deadline = None;
                    self.view.handle(AppEvent::TypingTimerElapsed { token })
                },
            };

            if let Some(outcome) = self.process_actions(actions).await? {
                break outcome;
            }
        };

        self.typing_deadline = None;
        self.driver.close();
        tracing::debug!(?outcome, "runtime stopped");
        Ok(outcome)
    }

    /// Wait for a driver event or the typing deadline, whichever comes first.
    ///
    /// The deadline wins ties so keystrokes exactly one idle period apart
    /// still get their own `typing(false)`.
    async fn next_step(&mut self) -> Result<Step, D::Error> {
        let Some((deadline, token)) = self.typing_deadline else {
            return Ok(Step::Driver(self.driver.poll_event().await?));
        };

        tokio::select! {
            biased;
            () = tokio::time::sleep_until(deadline) => Ok(Step::TimerElapsed(token)),
            event = self.driver.poll_event() => Ok(Step::Driver(event?)),
        }
    }

    /// Route a driver event to the view, through the bridge for channel
    /// signals.
    fn dispatch(&mut self, event: DriverEvent) -> Vec<AppAction> {
        match event {
            DriverEvent::Input(event) => self.view.handle(event),
            DriverEvent::Channel(signal) => {
                let mut actions = Vec::new();
                for event in self.bridge.handle_signal(signal) {
                    actions.extend(self.view.handle(event));
                }
                actions
            },
        }
    }

    /// Execute actions in order, including any produced while executing.
    ///
    /// Returns the outcome once the view asks to stop.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<AppAction>,
    ) -> Result<Option<Outcome>, D::Error> {
        let mut pending: VecDeque<AppAction> = initial_actions.into();
        let mut outcome = None;

        while let Some(action) = pending.pop_front() {
            match action {
                AppAction::Render => self.driver.render(&self.view)?,
                AppAction::Quit => outcome = Some(Outcome::Quit),
                AppAction::Emit(_) => {
                    let mut events = self.bridge.process_action(action);
                    events.extend(self.send_outgoing_frames().await);
                    for event in events {
                        pending.extend(self.view.handle(event));
                    }
                },
                AppAction::CloseChannel => self.driver.close(),
                AppAction::Navigate(Route::Root) => outcome = Some(Outcome::LoggedOut),
                AppAction::Navigate(route) => {
                    tracing::warn!(%route, "navigation target not handled by runtime");
                },
                AppAction::ArmTypingTimer { token, after } => {
                    self.typing_deadline = Some((Instant::now() + after, token));
                },
                AppAction::CancelTypingTimer => self.typing_deadline = None,
            }
        }

        Ok(outcome)
    }

    /// Send all pending outgoing frames.
    ///
    /// Failures are returned as `ChannelError` events so the view can show
    /// them; the loop keeps going.
    async fn send_outgoing_frames(&mut self) -> Vec<AppEvent> {
        let frames = self.bridge.take_outgoing();
        let mut events = Vec::new();

        for frame in frames {
            if !self.driver.is_connected() {
                tracing::debug!("dropping frame while disconnected");
                events.push(AppEvent::ChannelError { message: "channel not connected".into() });
                continue;
            }
            if let Err(e) = self.driver.send_frame(frame).await {
                tracing::warn!(error = %e, "failed to send frame");
                events.push(AppEvent::ChannelError { message: e.to_string() });
            }
        }

        events
    }

    /// Consume the runtime, returning the driver and the final view.
    pub fn into_parts(self) -> (D, ChatView) {
        (self.driver, self.view)
    }
}
