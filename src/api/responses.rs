//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::{Notification, StatusLine},
    state::{FocusTime, SessionSnapshot},
};

/// API response structure for session commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Create a running response
    pub fn running(message: String, session: SessionSnapshot) -> Self {
        Self::new("running".to_string(), message, session)
    }

    /// Create a paused response
    pub fn paused(message: String, session: SessionSnapshot) -> Self {
        Self::new("paused".to_string(), message, session)
    }

    /// Create an idle response
    pub fn idle(message: String, session: SessionSnapshot) -> Self {
        Self::new("idle".to_string(), message, session)
    }

    /// Create an error response
    pub fn error(message: String, session: SessionSnapshot) -> Self {
        Self::new("error".to_string(), message, session)
    }
}

/// Request body for POST /visibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub focused: bool,
}

/// Status response with the rendered status line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub status_line: StatusLine,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Cumulative focus time response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimeResponse {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_seconds: u64,
    pub text: String,
}

impl From<FocusTime> for FocusTimeResponse {
    fn from(focus_time: FocusTime) -> Self {
        Self {
            hours: focus_time.hours,
            minutes: focus_time.minutes,
            seconds: focus_time.seconds,
            total_seconds: focus_time.total_seconds(),
            text: focus_time.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
