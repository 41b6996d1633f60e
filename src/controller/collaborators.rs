//! Collaborators the session controller talks to
//!
//! The controller owns no timers, rendering or input handling. It calls into
//! these traits, which the daemon implements in `services`.

use std::time::Duration;

/// Identifies one started tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Repeating timer delivering ticks back to the controller
pub trait TickSource {
    /// Start ticking every `period`
    fn start(&mut self, period: Duration) -> TickHandle;

    /// Stop ticking. Stopping an unknown or already stopped handle is a no-op.
    fn stop(&mut self, handle: TickHandle);
}

/// Status line and one-shot notification surface
pub trait PresentationSink {
    fn set_text(&mut self, text: &str);
    fn show(&mut self);
    fn hide(&mut self);
    fn notify(&mut self, message: &str);
}

/// Asks the user for a value. `None` means cancelled or empty input.
pub trait Prompt {
    fn prompt(&mut self, message: &str, default_value: u64) -> Option<String>;
}
