//! State management module
//!
//! This module contains the timer state, the snapshots published from it and
//! the shared application state used by the HTTP handlers.

pub mod app_state;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use snapshot::SessionSnapshot;
pub use timer_state::{FocusTime, Phase, TimerState, MAX_MINUTES};
