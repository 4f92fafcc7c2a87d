//! State management module
//!
//! This module contains the timer data model and the shared server state.

pub mod mode;
pub mod timer_state;
pub mod alarm_state;
pub mod app_state;

// Re-export main types
pub use mode::{DurationMinutes, Mode, ModeDurations};
pub use timer_state::{format_clock, TimerState};
pub use alarm_state::AlarmState;
pub use app_state::AppState;
