//! Pomodoro session controller
//!
//! Owns the [`TimerState`] and advances it on start requests, ticks and
//! window visibility changes. Everything host-specific goes through the
//! collaborator traits.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    collaborators::{PresentationSink, Prompt, TickHandle, TickSource},
    error::SessionError,
};
use crate::state::{FocusTime, TimerState, MAX_MINUTES};

pub const FOCUS_PROMPT: &str = "Enter focus time (minutes):";
pub const BREAK_PROMPT: &str = "Enter break time (minutes):";
pub const SESSIONS_PROMPT: &str = "Enter number of pomodoro sessions:";

/// Initial defaults for the prompts and the tick period
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub focus_minutes: u64,
    pub break_minutes: u64,
    pub sessions: u64,
    pub tick_period: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            sessions: 4,
            tick_period: Duration::from_secs(1),
        }
    }
}

/// Phase change produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BreakStarted { session: u64 },
    SessionStarted { session: u64 },
    Completed { sessions: u64 },
}

pub struct SessionController<T, P> {
    state: TimerState,
    /// Present exactly while a tick source is running
    ticker: Option<TickHandle>,
    tick_source: T,
    sink: P,
    tick_period: Duration,
}

impl<T: TickSource, P: PresentationSink> SessionController<T, P> {
    /// Create an idle controller and render the initial status line
    pub fn new(settings: &SessionSettings, tick_source: T, sink: P) -> Self {
        let mut controller = Self {
            state: TimerState::new(
                settings.focus_minutes,
                settings.break_minutes,
                settings.sessions,
            ),
            ticker: None,
            tick_source,
            sink,
            tick_period: settings.tick_period,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn active_ticker(&self) -> Option<TickHandle> {
        self.ticker
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn tick_source(&self) -> &T {
        &self.tick_source
    }

    /// Read the run configuration from `prompt` and start counting down
    pub fn start(&mut self, prompt: &mut impl Prompt) -> Result<&TimerState, SessionError> {
        if self.state.is_running {
            let err = SessionError::AlreadyRunning;
            info!("Start requested while running, rejecting");
            self.sink.notify(&err.to_string());
            return Err(err);
        }

        let focus_minutes =
            self.read_value(prompt, FOCUS_PROMPT, "focus time", self.state.focus_minutes());
        let break_minutes =
            self.read_value(prompt, BREAK_PROMPT, "break time", self.state.break_minutes());
        let sessions =
            self.read_value(prompt, SESSIONS_PROMPT, "session count", self.state.total_sessions);

        self.state.focus_duration_seconds = focus_minutes * 60;
        self.state.break_duration_seconds = break_minutes * 60;
        self.state.total_sessions = sessions;
        self.state.current_session_index = 1;
        self.state.remaining_seconds = self.state.focus_duration_seconds;
        self.state.is_focus_phase = true;
        self.state.is_running = true;

        info!(
            "Starting pomodoro: focus={}min, break={}min, sessions={}",
            focus_minutes, break_minutes, sessions
        );

        self.render();
        self.start_ticker();
        Ok(&self.state)
    }

    /// Handle a tick from `handle`, discarding ticks from stopped sources
    pub fn handle_tick(&mut self, handle: TickHandle) -> Option<Transition> {
        if self.ticker != Some(handle) {
            debug!("Discarding stale tick from handle {}", handle.id());
            return None;
        }
        self.tick()
    }

    /// Advance the countdown by one second
    fn tick(&mut self) -> Option<Transition> {
        if !self.state.is_running || self.ticker.is_none() {
            debug!("Ignoring tick while paused or stopped");
            return None;
        }

        let was_focus = self.state.is_focus_phase;
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if was_focus {
            self.state.cumulative_focus_seconds += 1;
        }

        let transition = if self.state.remaining_seconds == 0 {
            Some(self.advance_phase())
        } else {
            None
        };

        self.render();
        transition
    }

    fn advance_phase(&mut self) -> Transition {
        // Completion wins over the focus -> break transition
        if self.state.is_focus_phase
            && self.state.current_session_index >= self.state.total_sessions
        {
            info!("All {} sessions completed", self.state.total_sessions);
            self.sink.notify("Pomodoro sessions completed!");
            self.stop_ticker();
            self.state.is_running = false;
            Transition::Completed {
                sessions: self.state.total_sessions,
            }
        } else if self.state.is_focus_phase {
            info!("Session {} focus done, starting break", self.state.current_session_index);
            self.sink.notify("Time for a break!");
            self.state.is_focus_phase = false;
            self.state.remaining_seconds = self.state.break_duration_seconds;
            Transition::BreakStarted {
                session: self.state.current_session_index,
            }
        } else {
            self.state.current_session_index += 1;
            info!("Starting session {}", self.state.current_session_index);
            self.sink.notify("Starting next pomodoro session!");
            self.state.is_focus_phase = true;
            self.state.remaining_seconds = self.state.focus_duration_seconds;
            Transition::SessionStarted {
                session: self.state.current_session_index,
            }
        }
    }

    /// Pause ticking while the host window is unfocused, resume when focused
    pub fn visibility_changed(&mut self, focused: bool) {
        if !self.state.is_running {
            return;
        }

        if focused {
            if self.ticker.is_none() {
                info!("Window focused, resuming timer");
                self.start_ticker();
            }
        } else if self.ticker.is_some() {
            info!("Window lost focus, pausing timer");
            self.stop_ticker();
        }
    }

    pub fn report_focus_time(&mut self) -> FocusTime {
        let focus_time = self.state.focus_time();
        self.sink.notify(&format!("Today's focus time: {}", focus_time));
        focus_time
    }

    /// Release the tick source and hide the status line
    pub fn teardown(&mut self) {
        self.stop_ticker();
        self.sink.hide();
    }

    fn render(&mut self) {
        let text = self.state.status_text();
        self.sink.set_text(&text);
        self.sink.show();
    }

    fn start_ticker(&mut self) {
        if self.ticker.is_none() {
            self.ticker = Some(self.tick_source.start(self.tick_period));
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.tick_source.stop(handle);
        }
    }

    fn read_value(
        &mut self,
        prompt: &mut impl Prompt,
        message: &str,
        field: &'static str,
        default_value: u64,
    ) -> u64 {
        let answer = match prompt.prompt(message, default_value) {
            Some(text) if !text.trim().is_empty() => text,
            _ => return default_value,
        };

        match parse_positive(field, &answer) {
            Ok(value) => value,
            Err(e) => {
                let message = format!("{}, using {}", e, default_value);
                warn!("{}", message);
                self.sink.notify(&message);
                default_value
            }
        }
    }
}

/// Parse a positive base-10 integer small enough to convert minutes to seconds
pub fn parse_positive(field: &'static str, text: &str) -> Result<u64, SessionError> {
    text.trim()
        .parse::<u64>()
        .ok()
        .filter(|value| (1..=MAX_MINUTES).contains(value))
        .ok_or_else(|| SessionError::MalformedConfigInput {
            field,
            value: text.to_string(),
        })
}
