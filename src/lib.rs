//! Pomodoro Server - a Pomodoro countdown timer with a local HTTP front end
//!
//! The timer logic lives in [`controller::TimerController`], which renders
//! through a [`view::View`], sounds an [`alarm::Alarm`] and is ticked by a
//! [`scheduler::Scheduler`]. The server binary wires those seams to a
//! published UI snapshot, a browser-played alarm and tokio timers.

pub mod alarm;
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod scheduler;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use controller::TimerController;
pub use error::TimerError;
pub use state::{AppState, Mode};
pub use api::create_router;
pub use tasks::spawn_controller;
pub use utils::signals::shutdown_signal;
