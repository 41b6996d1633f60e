//! Pomodoro Daemon - A local HTTP daemon running a focus/break interval timer
//!
//! The session controller advances a pomodoro state machine once per tick.
//! Editor plugins and status-bar scripts drive it over HTTP and read back
//! the rendered status line and notifications.

pub mod config;
pub mod controller;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use controller::{SessionController, SessionError, SessionSettings};
pub use state::AppState;
pub use api::create_router;
pub use tasks::SessionLoop;
pub use utils::signals::shutdown_signal;
