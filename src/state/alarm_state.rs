//! End-of-countdown alarm state

use serde::Serialize;

/// Whether the alarm is sounding, and how many times it has fired
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlarmState {
    pub playing: bool,
    pub fired: u64,
}
