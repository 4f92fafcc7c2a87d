//! Timer modes and their configurable durations

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// One of the three timer presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Name used on the wire and in URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Factory duration for this mode
    pub fn default_duration(&self) -> DurationMinutes {
        match self {
            Mode::Work => DurationMinutes(25),
            Mode::ShortBreak => DurationMinutes(5),
            Mode::LongBreak => DurationMinutes(15),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" | "pomodoro" => Ok(Mode::Work),
            "short-break" | "shortBreak" => Ok(Mode::ShortBreak),
            "long-break" | "longBreak" => Ok(Mode::LongBreak),
            other => Err(TimerError::UnknownMode(other.to_string())),
        }
    }
}

/// A mode duration in whole minutes, always within `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 60;

    pub fn new(minutes: u32) -> Result<Self, TimerError> {
        if (Self::MIN..=Self::MAX).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(Self::out_of_range(i64::from(minutes)))
        }
    }

    /// Validate a minute count as it arrives in a JSON body
    ///
    /// JSON numbers may be negative, fractional or larger than `u32`; all of
    /// those are rejected here rather than by the deserializer.
    pub fn from_json_number(minutes: f64) -> Result<Self, TimerError> {
        if !minutes.is_finite() || minutes.fract() != 0.0 {
            return Err(TimerError::FractionalDuration(minutes.to_string()));
        }
        // saturating cast; anything past i64 is out of range anyway
        let whole = minutes as i64;
        match u32::try_from(whole) {
            Ok(minutes) => Self::new(minutes),
            Err(_) => Err(Self::out_of_range(whole)),
        }
    }

    fn out_of_range(minutes: i64) -> TimerError {
        TimerError::DurationOutOfRange {
            minutes,
            min: Self::MIN,
            max: Self::MAX,
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_seconds(&self) -> u64 {
        u64::from(self.0) * 60
    }
}

/// Configured duration for each mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModeDurations {
    pub work: DurationMinutes,
    pub short_break: DurationMinutes,
    pub long_break: DurationMinutes,
}

impl ModeDurations {
    pub fn get(&self, mode: Mode) -> DurationMinutes {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn set(&mut self, mode: Mode, minutes: DurationMinutes) {
        match mode {
            Mode::Work => self.work = minutes,
            Mode::ShortBreak => self.short_break = minutes,
            Mode::LongBreak => self.long_break = minutes,
        }
    }
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            work: Mode::Work.default_duration(),
            short_break: Mode::ShortBreak.default_duration(),
            long_break: Mode::LongBreak.default_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_25_5_15() {
        let durations = ModeDurations::default();
        assert_eq!(durations.get(Mode::Work).get(), 25);
        assert_eq!(durations.get(Mode::ShortBreak).get(), 5);
        assert_eq!(durations.get(Mode::LongBreak).get(), 15);
    }

    #[test]
    fn duration_bounds_are_enforced() {
        assert!(DurationMinutes::new(1).is_ok());
        assert!(DurationMinutes::new(60).is_ok());
        assert_eq!(
            DurationMinutes::new(0),
            Err(TimerError::DurationOutOfRange { minutes: 0, min: 1, max: 60 })
        );
        assert!(DurationMinutes::new(61).is_err());
    }

    #[test]
    fn json_numbers_must_be_whole_and_in_range() {
        assert_eq!(DurationMinutes::from_json_number(30.0).map(|m| m.get()), Ok(30));
        assert_eq!(
            DurationMinutes::from_json_number(-1.0),
            Err(TimerError::DurationOutOfRange { minutes: -1, min: 1, max: 60 })
        );
        assert_eq!(
            DurationMinutes::from_json_number(4294967296.0),
            Err(TimerError::DurationOutOfRange { minutes: 4294967296, min: 1, max: 60 })
        );
        assert_eq!(
            DurationMinutes::from_json_number(2.5),
            Err(TimerError::FractionalDuration("2.5".to_string()))
        );
    }

    #[test]
    fn mode_names_parse_both_spellings() {
        assert_eq!("work".parse::<Mode>(), Ok(Mode::Work));
        assert_eq!("shortBreak".parse::<Mode>(), Ok(Mode::ShortBreak));
        assert_eq!("long-break".parse::<Mode>(), Ok(Mode::LongBreak));
        assert_eq!(
            "lunch".parse::<Mode>(),
            Err(TimerError::UnknownMode("lunch".to_string()))
        );
    }

    #[test]
    fn set_only_touches_one_mode() {
        let mut durations = ModeDurations::default();
        durations.set(Mode::ShortBreak, DurationMinutes::new(8).unwrap());
        assert_eq!(durations.short_break.as_seconds(), 480);
        assert_eq!(durations.work, Mode::Work.default_duration());
        assert_eq!(durations.long_break, Mode::LongBreak.default_duration());
    }
}
