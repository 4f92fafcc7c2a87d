//! Timer state structure and management

use serde::Serialize;

use super::Mode;

/// Countdown state owned by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub running: bool,
    pub mode: Mode,
}

impl TimerState {
    /// Create a stopped timer in `mode` with `remaining_seconds` on the clock
    pub fn new(mode: Mode, remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds,
            running: false,
            mode,
        }
    }

    /// Remaining time rendered as zero-padded `MM:SS`
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Render seconds as `MM:SS`
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(1495), "24:55");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn new_timer_is_stopped() {
        let state = TimerState::new(Mode::LongBreak, 900);
        assert!(!state.running);
        assert_eq!(state.display(), "15:00");
    }
}
