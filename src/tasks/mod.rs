//! Background tasks module
//!
//! This module contains the timer event loop that runs alongside the HTTP server.

pub mod controller_loop;

// Re-export main items
pub use controller_loop::{
    controller_loop, spawn_controller, Action, Command, ControllerLink, ControllerStatus,
};
