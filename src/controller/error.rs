//! Session controller errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Pomodoro is already running.")]
    AlreadyRunning,

    #[error("'{value}' is not a valid {field}")]
    MalformedConfigInput { field: &'static str, value: String },
}
