//! Host-side collaborator implementations
//!
//! This module binds the session controller's collaborator traits to the
//! daemon: tokio interval tasks for ticks, watch channels and a bounded log
//! for presentation, and HTTP request bodies for prompts.

pub mod presenter;
pub mod prompt;
pub mod ticker;

// Re-export main types
pub use presenter::{ChannelPresenter, Notification, NotificationLog, StatusLine};
pub use prompt::{StartAnswers, RequestPrompt};
pub use ticker::TokioTicker;
