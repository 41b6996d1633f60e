//! Timer state structure and the phase derived from it

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest minute value that still converts to seconds without overflow
pub const MAX_MINUTES: u64 = u64::MAX / 60;

/// Countdown state of the pomodoro run, owned by the session controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub focus_duration_seconds: u64,
    pub break_duration_seconds: u64,
    pub total_sessions: u64,
    /// 0 until the first run starts, then 1..=total_sessions
    pub current_session_index: u64,
    pub remaining_seconds: u64,
    pub is_focus_phase: bool,
    pub is_running: bool,
    /// Seconds spent in focus phase over the whole process lifetime
    pub cumulative_focus_seconds: u64,
}

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Focus { session: u64 },
    Break { session: u64 },
    Completed { sessions: u64 },
}

impl TimerState {
    /// Create an idle timer state with the given durations
    pub fn new(focus_minutes: u64, break_minutes: u64, total_sessions: u64) -> Self {
        Self {
            focus_duration_seconds: focus_minutes * 60,
            break_duration_seconds: break_minutes * 60,
            total_sessions,
            current_session_index: 0,
            remaining_seconds: focus_minutes * 60,
            is_focus_phase: true,
            is_running: false,
            cumulative_focus_seconds: 0,
        }
    }

    pub fn focus_minutes(&self) -> u64 {
        self.focus_duration_seconds / 60
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_duration_seconds / 60
    }

    /// Derive the current phase from the raw fields
    pub fn phase(&self) -> Phase {
        match (self.is_running, self.is_focus_phase) {
            (true, true) => Phase::Focus {
                session: self.current_session_index,
            },
            (true, false) => Phase::Break {
                session: self.current_session_index,
            },
            (false, _) if self.current_session_index == 0 => Phase::Idle,
            (false, _) => Phase::Completed {
                sessions: self.total_sessions,
            },
        }
    }

    /// Status line text for the presentation sink
    pub fn status_text(&self) -> String {
        if !self.is_running {
            return "start pomodoro".to_string();
        }

        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!(
            "pomodoro {}/{} - {}: {}:{:02}",
            self.current_session_index,
            self.total_sessions,
            if self.is_focus_phase { "focus" } else { "break" },
            minutes,
            seconds
        )
    }

    pub fn focus_time(&self) -> FocusTime {
        FocusTime::from_seconds(self.cumulative_focus_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(25, 5, 4)
    }
}

/// Cumulative focus time split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl FocusTime {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for FocusTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}
