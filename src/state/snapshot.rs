//! Read-only view of the session published after every command

use serde::{Deserialize, Serialize};

use super::{Phase, TimerState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub timer: TimerState,
    pub phase: Phase,
    /// Whether a tick source is currently active
    pub ticking: bool,
}

impl SessionSnapshot {
    pub fn new(timer: &TimerState, ticking: bool) -> Self {
        Self {
            timer: timer.clone(),
            phase: timer.phase(),
            ticking,
        }
    }
}
