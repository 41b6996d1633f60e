//! Background tasks module
//!
//! This module contains the session loop that runs alongside the HTTP server.

pub mod session_loop;

// Re-export main types
pub use session_loop::{SessionChannels, SessionCommand, SessionLoop};
