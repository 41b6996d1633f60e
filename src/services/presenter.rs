//! Presentation sink backed by a watch channel and a notification log

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::controller::PresentationSink;

/// What a client should currently show in its status bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub visible: bool,
}

/// One-shot message for the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded log of the most recent notifications, oldest first
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a notification, dropping the oldest one when full
    pub fn push(&self, message: &str) -> Result<(), String> {
        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock notification log: {}", e))?;

        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(Notification {
            message: message.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    pub fn recent(&self) -> Result<Vec<Notification>, String> {
        self.entries.lock()
            .map(|entries| entries.iter().cloned().collect())
            .map_err(|e| format!("Failed to lock notification log: {}", e))
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Publishes the status line to watchers and records notifications
pub struct ChannelPresenter {
    status_tx: watch::Sender<StatusLine>,
    line: StatusLine,
    log: NotificationLog,
}

impl ChannelPresenter {
    pub fn new(status_tx: watch::Sender<StatusLine>, log: NotificationLog) -> Self {
        Self {
            status_tx,
            line: StatusLine::default(),
            log,
        }
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.line.clone());
    }
}

impl PresentationSink for ChannelPresenter {
    fn set_text(&mut self, text: &str) {
        self.line.text = text.to_string();
        self.publish();
    }

    fn show(&mut self) {
        if !self.line.visible {
            self.line.visible = true;
            self.publish();
        }
    }

    fn hide(&mut self) {
        self.line.visible = false;
        self.publish();
    }

    fn notify(&mut self, message: &str) {
        info!("Notification: {}", message);
        if let Err(e) = self.log.push(message) {
            warn!("Failed to record notification: {}", e);
        }
    }
}
