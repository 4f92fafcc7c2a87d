//! Pomodoro timer controller
//!
//! [`TimerController`] owns the countdown, the configured mode durations and
//! the live tick schedule. It renders through an injected [`View`], sounds an
//! injected [`Alarm`] and gets its one-second tick from an injected
//! [`Scheduler`]. All operations are infallible; redundant start/stop calls
//! are no-ops.

use tracing::{debug, info};

use crate::{
    alarm::Alarm,
    scheduler::{Scheduler, TickHandle, TickId, TICK_PERIOD},
    state::{AlarmState, DurationMinutes, Mode, ModeDurations, TimerState},
    view::{Affordance, View},
};

pub struct TimerController<V, A, S> {
    timer: TimerState,
    alarm_state: AlarmState,
    durations: ModeDurations,
    tick: Option<TickHandle>,
    view: V,
    alarm: A,
    scheduler: S,
}

impl<V, A, S> TimerController<V, A, S>
where
    V: View,
    A: Alarm,
    S: Scheduler,
{
    /// Create a stopped controller in work mode and render the initial view
    pub fn new(view: V, alarm: A, scheduler: S) -> Self {
        let durations = ModeDurations::default();
        let mut controller = Self {
            timer: TimerState::new(Mode::Work, durations.work.as_seconds()),
            alarm_state: AlarmState::default(),
            durations,
            tick: None,
            view,
            alarm,
            scheduler,
        };
        controller.render_all();
        controller
    }

    fn render_all(&mut self) {
        self.refresh_display();
        self.view.set_mode_active(self.timer.mode);
        self.apply_running_affordances();
        self.view.set_affordance_visible(Affordance::StopAlarm, self.alarm_state.playing);
        for mode in Mode::ALL {
            self.view.set_duration_readout(mode, self.durations.get(mode));
        }
    }

    fn refresh_display(&mut self) {
        let text = self.timer.display();
        self.view.set_display(&text);
    }

    fn apply_running_affordances(&mut self) {
        let running = self.timer.running;
        self.view.set_affordance_enabled(Affordance::Start, !running);
        self.view.set_affordance_enabled(Affordance::Stop, running);
        self.view.set_affordance_enabled(Affordance::Reset, !running);
    }

    /// Begin counting down. No-op while already running.
    pub fn start(&mut self) {
        if self.timer.running {
            debug!("Start ignored, timer already running");
            return;
        }

        self.timer.running = true;
        self.apply_running_affordances();
        self.tick = Some(self.scheduler.schedule_repeating(TICK_PERIOD));
        info!("Timer started in {} mode at {}", self.timer.mode, self.timer.display());
    }

    /// Advance the countdown by one tick from schedule `id`
    ///
    /// Ticks from anything but the live schedule are dropped, so a tick that
    /// was queued before `stop()` never reaches the countdown.
    pub fn tick(&mut self, id: TickId) {
        if self.tick.as_ref().map(TickHandle::id) != Some(id) {
            debug!("Dropping stale {}", id);
            return;
        }

        if self.timer.remaining_seconds == 0 {
            self.stop();
            self.alarm.play();
            self.alarm_state.playing = true;
            self.alarm_state.fired += 1;
            self.view.set_affordance_visible(Affordance::StopAlarm, true);
            info!("Countdown finished in {} mode, alarm fired", self.timer.mode);
            return;
        }

        self.timer.remaining_seconds -= 1;
        self.refresh_display();
    }

    /// Pause the countdown. No-op while already stopped.
    pub fn stop(&mut self) {
        if !self.timer.running {
            debug!("Stop ignored, timer not running");
            return;
        }

        self.timer.running = false;
        if let Some(handle) = self.tick.take() {
            handle.cancel();
        }
        self.apply_running_affordances();
        info!("Timer stopped at {}", self.timer.display());
    }

    /// Stop and rewind to the active mode's configured duration
    pub fn reset(&mut self) {
        self.stop();
        self.timer.remaining_seconds = self.durations.get(self.timer.mode).as_seconds();
        self.refresh_display();
        info!("Timer reset to {}", self.timer.display());
    }

    /// Stop and switch to `mode` with its configured duration
    pub fn set_mode(&mut self, mode: Mode) {
        self.stop();
        self.timer.mode = mode;
        self.timer.remaining_seconds = self.durations.get(mode).as_seconds();
        self.refresh_display();
        self.view.set_mode_active(mode);
        info!("Switched to {} mode ({})", mode, self.timer.display());
    }

    /// Change the configured duration of `mode`
    ///
    /// If `mode` is active and the timer is stopped, the countdown is moved to
    /// the new duration straight away.
    pub fn set_mode_duration(&mut self, mode: Mode, minutes: DurationMinutes) {
        self.durations.set(mode, minutes);
        self.view.set_duration_readout(mode, minutes);
        info!("{} duration set to {}min", mode, minutes.get());
        if mode == self.timer.mode {
            self.apply_duration_to_idle_timer();
        }
    }

    /// Put every mode back to its factory duration (25/5/15)
    pub fn restore_defaults(&mut self) {
        self.durations = ModeDurations::default();
        for mode in Mode::ALL {
            self.view.set_duration_readout(mode, self.durations.get(mode));
        }
        info!("Mode durations restored to defaults");
        self.apply_duration_to_idle_timer();
    }

    fn apply_duration_to_idle_timer(&mut self) {
        if self.timer.running {
            return;
        }
        self.timer.remaining_seconds = self.durations.get(self.timer.mode).as_seconds();
        self.refresh_display();
    }

    /// Silence a sounding alarm and hide the stop-alarm control
    pub fn dismiss_alarm(&mut self) {
        if !self.alarm_state.playing {
            debug!("Dismiss ignored, alarm not playing");
            return;
        }

        self.alarm.stop();
        self.alarm.rewind();
        self.alarm_state.playing = false;
        self.view.set_affordance_visible(Affordance::StopAlarm, false);
        info!("Alarm dismissed");
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer
    }

    pub fn alarm_state(&self) -> &AlarmState {
        &self.alarm_state
    }

    pub fn durations(&self) -> &ModeDurations {
        &self.durations
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.timer.remaining_seconds
    }

    pub fn mode(&self) -> Mode {
        self.timer.mode
    }

    pub fn display(&self) -> String {
        self.timer.display()
    }

    /// Id of the live tick schedule, if the timer is running
    pub fn live_tick(&self) -> Option<TickId> {
        self.tick.as_ref().map(TickHandle::id)
    }
}
