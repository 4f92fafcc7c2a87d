//! Rendering seam between the timer controller and whatever shows it
//!
//! The controller never touches a UI toolkit directly. It only calls [`View`].
//! The server build renders into a [`UiSnapshot`] that is published over a
//! `watch` channel and polled by the bundled browser page.

use std::sync::Arc;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::state::{format_clock, DurationMinutes, Mode, ModeDurations};

/// A control whose enabled or visible state follows the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    Start,
    Stop,
    Reset,
    StopAlarm,
}

/// Operations the controller needs from a rendering target
pub trait View {
    fn set_display(&mut self, text: &str);
    fn set_mode_active(&mut self, mode: Mode);
    fn set_affordance_enabled(&mut self, affordance: Affordance, enabled: bool);
    fn set_affordance_visible(&mut self, affordance: Affordance, visible: bool);
    fn set_duration_readout(&mut self, mode: Mode, minutes: DurationMinutes);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffordanceState {
    pub enabled: bool,
    pub visible: bool,
}

impl AffordanceState {
    fn shown(enabled: bool) -> Self {
        Self { enabled, visible: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub start: AffordanceState,
    pub stop: AffordanceState,
    pub reset: AffordanceState,
    pub stop_alarm: AffordanceState,
}

impl Affordances {
    fn get_mut(&mut self, affordance: Affordance) -> &mut AffordanceState {
        match affordance {
            Affordance::Start => &mut self.start,
            Affordance::Stop => &mut self.stop,
            Affordance::Reset => &mut self.reset,
            Affordance::StopAlarm => &mut self.stop_alarm,
        }
    }
}

/// Audio element as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmInfo {
    /// URL of the sound the client should play
    pub source: String,
    pub playing: bool,
    /// Bumped once per completed countdown; the client plays on change
    pub plays: u64,
    /// True once the sound has been rewound to the beginning
    pub rewound: bool,
}

/// Everything a client needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiSnapshot {
    pub display: String,
    pub active_mode: Mode,
    pub affordances: Affordances,
    pub durations: ModeDurations,
    pub alarm: AlarmInfo,
}

impl UiSnapshot {
    /// Snapshot of a freshly loaded page, before the controller renders into it
    pub fn new(alarm_source: impl Into<String>) -> Self {
        let durations = ModeDurations::default();
        Self {
            display: format_clock(durations.work.as_seconds()),
            active_mode: Mode::Work,
            affordances: Affordances {
                start: AffordanceState::shown(true),
                stop: AffordanceState::shown(false),
                reset: AffordanceState::shown(true),
                stop_alarm: AffordanceState { enabled: true, visible: false },
            },
            durations,
            alarm: AlarmInfo {
                source: alarm_source.into(),
                playing: false,
                plays: 0,
                rewound: true,
            },
        }
    }
}

/// Shared write side of the snapshot channel
pub type SnapshotSender = Arc<watch::Sender<UiSnapshot>>;

/// Create the snapshot channel used by [`SnapshotView`] and the alarm
pub fn snapshot_channel(alarm_source: impl Into<String>) -> (SnapshotSender, watch::Receiver<UiSnapshot>) {
    let (tx, rx) = watch::channel(UiSnapshot::new(alarm_source));
    (Arc::new(tx), rx)
}

/// View that renders into a published [`UiSnapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotView {
    tx: SnapshotSender,
}

impl SnapshotView {
    pub fn new(tx: SnapshotSender) -> Self {
        Self { tx }
    }

    fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut UiSnapshot),
    {
        // send_modify never fails, even with no receivers left
        self.tx.send_modify(updater);
    }
}

impl View for SnapshotView {
    fn set_display(&mut self, text: &str) {
        debug!("Display: {}", text);
        self.update(|snapshot| snapshot.display = text.to_string());
    }

    fn set_mode_active(&mut self, mode: Mode) {
        self.update(|snapshot| snapshot.active_mode = mode);
    }

    fn set_affordance_enabled(&mut self, affordance: Affordance, enabled: bool) {
        self.update(|snapshot| snapshot.affordances.get_mut(affordance).enabled = enabled);
    }

    fn set_affordance_visible(&mut self, affordance: Affordance, visible: bool) {
        self.update(|snapshot| snapshot.affordances.get_mut(affordance).visible = visible);
    }

    fn set_duration_readout(&mut self, mode: Mode, minutes: DurationMinutes) {
        self.update(|snapshot| snapshot.durations.set(mode, minutes));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snapshot_matches_page_defaults() {
        let snapshot = UiSnapshot::new("alarm.mp3");
        assert_eq!(snapshot.display, "25:00");
        assert_eq!(snapshot.active_mode, Mode::Work);
        assert!(snapshot.affordances.start.enabled);
        assert!(!snapshot.affordances.stop.enabled);
        assert!(!snapshot.affordances.stop_alarm.visible);
        assert_eq!(snapshot.alarm.source, "alarm.mp3");
    }

    #[test]
    fn view_updates_reach_receivers() {
        let (tx, rx) = snapshot_channel("alarm.mp3");
        let mut view = SnapshotView::new(tx);

        view.set_display("04:59");
        view.set_mode_active(Mode::ShortBreak);
        view.set_affordance_enabled(Affordance::Reset, false);
        view.set_affordance_visible(Affordance::StopAlarm, true);
        view.set_duration_readout(Mode::LongBreak, DurationMinutes::new(20).unwrap());

        let snapshot = rx.borrow();
        assert_eq!(snapshot.display, "04:59");
        assert_eq!(snapshot.active_mode, Mode::ShortBreak);
        assert!(!snapshot.affordances.reset.enabled);
        assert!(snapshot.affordances.stop_alarm.visible);
        assert_eq!(snapshot.durations.long_break.get(), 20);
    }

    #[test]
    fn snapshot_serializes_with_kebab_case_modes() {
        let snapshot = UiSnapshot::new("alarm.mp3");
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["active_mode"], "work");
        assert_eq!(json["durations"]["short-break"], 5);
    }
}
