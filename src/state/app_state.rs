//! Main application state shared by the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::info;

use super::{FocusTime, SessionSnapshot};
use crate::{
    controller::SessionError,
    services::{Notification, NotificationLog, StartAnswers, StatusLine},
    tasks::{SessionChannels, SessionCommand},
};

/// Handle to the session loop plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// Command queue into the session loop
    pub commands: mpsc::Sender<SessionCommand>,
    /// Latest session snapshot and status line published by the loop
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    pub status_rx: watch::Receiver<StatusLine>,
    pub notifications: NotificationLog,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around the channels of a session loop
    pub fn new(port: u16, host: String, channels: SessionChannels) -> Self {
        Self {
            commands: channels.commands,
            snapshot_rx: channels.snapshot_rx,
            status_rx: channels.status_rx,
            notifications: channels.notifications,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the session loop and wait for its reply
    async fn request<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> SessionCommand,
    ) -> Result<R, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|e| format!("Session loop unavailable: {}", e))?;
        reply_rx
            .await
            .map_err(|e| format!("Session loop dropped the request: {}", e))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start a pomodoro run with the given prompt answers
    pub async fn start(
        &self,
        answers: StartAnswers,
    ) -> Result<Result<SessionSnapshot, SessionError>, String> {
        let result = self
            .request(|reply| SessionCommand::Start { answers, reply })
            .await?;
        if result.is_ok() {
            self.record_action("start");
        }
        Ok(result)
    }

    /// Report a host window focus change
    pub async fn set_visibility(&self, focused: bool) -> Result<SessionSnapshot, String> {
        let snapshot = self
            .request(|reply| SessionCommand::Visibility { focused, reply })
            .await?;
        self.record_action(if focused { "focus" } else { "blur" });
        Ok(snapshot)
    }

    pub async fn report_focus_time(&self) -> Result<FocusTime, String> {
        self.request(|reply| SessionCommand::ReportFocusTime { reply })
            .await
    }

    /// Tear down the session and stop the loop
    pub async fn shutdown(&self) -> Result<(), String> {
        info!("Shutting down session loop");
        self.request(|reply| SessionCommand::Shutdown { reply })
            .await
    }

    pub fn get_snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn get_status_line(&self) -> StatusLine {
        self.status_rx.borrow().clone()
    }

    pub fn get_notifications(&self) -> Result<Vec<Notification>, String> {
        self.notifications.recent()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
