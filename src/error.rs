//! Error types shared by the controller boundary and the HTTP layer

use thiserror::Error;

/// Errors raised while turning outside input into controller commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The requested mode name is not one of the three presets
    #[error("unknown mode '{0}' (expected work, short-break or long-break)")]
    UnknownMode(String),

    /// A mode duration outside of the allowed minute range
    #[error("duration {minutes}min is out of range ({min}..={max})")]
    DurationOutOfRange { minutes: i64, min: u32, max: u32 },

    /// A mode duration that is not a whole number of minutes
    #[error("duration {0}min is not a whole number of minutes")]
    FractionalDuration(String),

    /// A request body that could not be read as the expected JSON
    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    /// The controller loop is gone, so commands can no longer be delivered
    #[error("timer controller is not running")]
    ControllerUnavailable,
}
