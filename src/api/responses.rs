//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{tasks::ControllerStatus, view::UiSnapshot};

/// API response for every timer command
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: ControllerStatus,
    pub ui: UiSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: ControllerStatus, ui: UiSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
            ui,
        }
    }

    /// Response for a command that leaves the countdown running
    pub fn running(message: String, timer: ControllerStatus, ui: UiSnapshot) -> Self {
        Self::new("running".to_string(), message, timer, ui)
    }

    /// Response for a command that leaves the countdown stopped
    pub fn stopped(message: String, timer: ControllerStatus, ui: UiSnapshot) -> Self {
        Self::new("stopped".to_string(), message, timer, ui)
    }

    /// Pick `running` or `stopped` from the controller state
    pub fn from_status(message: String, timer: ControllerStatus, ui: UiSnapshot) -> Self {
        if timer.timer.running {
            Self::running(message, timer, ui)
        } else {
            Self::stopped(message, timer, ui)
        }
    }
}

/// Body returned with 4xx/5xx responses
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with UI snapshot and server information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: ControllerStatus,
    pub ui: UiSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Request body for `PUT /durations/:mode`
#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    /// Any JSON number; validated by `DurationMinutes::from_json_number`
    pub minutes: f64,
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
