//! Shared server state handed to every HTTP handler

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use crate::{
    error::TimerError,
    tasks::{Action, Command, ControllerLink, ControllerStatus},
    view::UiSnapshot,
};

/// Main application state: a line to the controller loop plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// Command channel into the controller loop
    commands: mpsc::Sender<Command>,
    /// Latest rendered UI
    snapshot_rx: watch::Receiver<UiSnapshot>,
    /// Latest controller state
    status_rx: watch::Receiver<ControllerStatus>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the state around an already spawned controller loop
    pub fn new(port: u16, host: String, link: &ControllerLink) -> Self {
        Self {
            commands: link.commands.clone(),
            snapshot_rx: link.snapshot_rx.clone(),
            status_rx: link.status_rx.clone(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Run `action` on the controller and wait until it has been applied
    pub async fn dispatch(&self, action: Action) -> Result<ControllerStatus, TimerError> {
        let label = action.label();
        info!("Dispatching {}", label);

        let (reply, ack) = oneshot::channel();
        self.commands
            .send(Command { action, reply: Some(reply) })
            .await
            .map_err(|_| TimerError::ControllerUnavailable)?;
        let status = ack.await.map_err(|_| TimerError::ControllerUnavailable)?;

        self.record_action(label);
        Ok(status)
    }

    fn record_action(&self, label: String) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(label),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get the latest UI snapshot
    pub fn snapshot(&self) -> UiSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Get the latest controller state
    pub fn status(&self) -> ControllerStatus {
        self.status_rx.borrow().clone()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::spawn_controller;

    #[tokio::test]
    async fn dispatch_records_last_action() {
        let link = spawn_controller("alarm.mp3");
        let state = AppState::new(20554, "127.0.0.1".to_string(), &link);

        assert_eq!(state.get_last_action(), (None, None));
        let status = state.dispatch(Action::Start).await.unwrap();
        assert!(status.timer.running);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());
        assert!(state.status().timer.running);
    }

    #[tokio::test]
    async fn dispatch_fails_once_loop_is_gone() {
        let link = spawn_controller("alarm.mp3");
        let state = AppState::new(20554, "127.0.0.1".to_string(), &link);
        link.task.abort();
        let _ = link.task.await;

        assert_eq!(
            state.dispatch(Action::Reset).await,
            Err(TimerError::ControllerUnavailable)
        );
    }

    #[tokio::test]
    async fn fresh_server_reports_seconds_of_uptime() {
        let link = spawn_controller("alarm.mp3");
        let state = AppState::new(20554, "127.0.0.1".to_string(), &link);
        assert!(state.get_uptime().ends_with('s'));
    }
}
