//! Session controller module
//!
//! The pomodoro state machine and the collaborator traits it drives.

pub mod collaborators;
pub mod error;
pub mod session;

// Re-export main types
pub use collaborators::{PresentationSink, Prompt, TickHandle, TickSource};
pub use error::SessionError;
pub use session::{SessionController, SessionSettings, Transition};
