//! Event loop that owns the timer controller
//!
//! User commands and scheduler ticks arrive on two channels and are applied
//! one at a time, so the controller never needs a lock.

use serde::Serialize;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    alarm::{Alarm, RemoteAlarm},
    controller::TimerController,
    scheduler::{Scheduler, TickId, TokioScheduler},
    state::{AlarmState, DurationMinutes, Mode, ModeDurations, TimerState},
    view::{snapshot_channel, SnapshotView, UiSnapshot, View},
};

/// Pending user commands the loop will buffer before senders wait
const COMMAND_BUFFER: usize = 32;

/// A user-initiated controller operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Reset,
    SetMode(Mode),
    SetModeDuration(Mode, DurationMinutes),
    RestoreDefaults,
    DismissAlarm,
}

impl Action {
    /// Short label used for last-action tracking and logs
    pub fn label(&self) -> String {
        match self {
            Action::Start => "start".to_string(),
            Action::Stop => "stop".to_string(),
            Action::Reset => "reset".to_string(),
            Action::SetMode(mode) => format!("mode:{}", mode),
            Action::SetModeDuration(mode, minutes) => format!("duration:{}={}", mode, minutes.get()),
            Action::RestoreDefaults => "restore-defaults".to_string(),
            Action::DismissAlarm => "dismiss-alarm".to_string(),
        }
    }
}

/// An action plus an optional acknowledgement channel
#[derive(Debug)]
pub struct Command {
    pub action: Action,
    pub reply: Option<oneshot::Sender<ControllerStatus>>,
}

/// Controller state as seen after a command or tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerStatus {
    pub timer: TimerState,
    pub alarm: AlarmState,
    pub durations: ModeDurations,
}

impl<V: View, A: Alarm, S: Scheduler> From<&TimerController<V, A, S>> for ControllerStatus {
    fn from(controller: &TimerController<V, A, S>) -> Self {
        Self {
            timer: controller.timer_state().clone(),
            alarm: controller.alarm_state().clone(),
            durations: *controller.durations(),
        }
    }
}

fn apply<V: View, A: Alarm, S: Scheduler>(controller: &mut TimerController<V, A, S>, action: Action) {
    match action {
        Action::Start => controller.start(),
        Action::Stop => controller.stop(),
        Action::Reset => controller.reset(),
        Action::SetMode(mode) => controller.set_mode(mode),
        Action::SetModeDuration(mode, minutes) => controller.set_mode_duration(mode, minutes),
        Action::RestoreDefaults => controller.restore_defaults(),
        Action::DismissAlarm => controller.dismiss_alarm(),
    }
}

/// Drive `controller` until the command channel closes
pub async fn controller_loop<V, A, S>(
    mut controller: TimerController<V, A, S>,
    mut commands: mpsc::Receiver<Command>,
    mut ticks: mpsc::UnboundedReceiver<TickId>,
    status_tx: watch::Sender<ControllerStatus>,
) where
    V: View,
    A: Alarm,
    S: Scheduler,
{
    info!("Starting timer controller loop");

    loop {
        tokio::select! {
            // User input wins over a simultaneous tick, so a stop is never
            // overtaken by the tick that was due at the same instant
            biased;

            command = commands.recv() => {
                let Some(Command { action, reply }) = command else {
                    info!("Command channel closed, stopping controller loop");
                    break;
                };

                debug!("Applying {}", action.label());
                apply(&mut controller, action);
                let status = ControllerStatus::from(&controller);
                status_tx.send_replace(status.clone());

                if let Some(reply) = reply {
                    if reply.send(status).is_err() {
                        warn!("Caller went away before {} was acknowledged", action.label());
                    }
                }
            }

            Some(id) = ticks.recv() => {
                controller.tick(id);
                status_tx.send_replace(ControllerStatus::from(&controller));
            }
        }
    }

    controller.stop();
}

/// Handles to a spawned controller loop
#[derive(Debug)]
pub struct ControllerLink {
    pub commands: mpsc::Sender<Command>,
    pub snapshot_rx: watch::Receiver<UiSnapshot>,
    pub status_rx: watch::Receiver<ControllerStatus>,
    pub task: JoinHandle<()>,
}

/// Build the server controller and spawn its loop on the current runtime
pub fn spawn_controller(alarm_source: &str) -> ControllerLink {
    let (snapshot_tx, snapshot_rx) = snapshot_channel(alarm_source);
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

    let controller = TimerController::new(
        SnapshotView::new(snapshot_tx.clone()),
        RemoteAlarm::new(snapshot_tx),
        TokioScheduler::new(tick_tx),
    );
    let (status_tx, status_rx) = watch::channel(ControllerStatus::from(&controller));

    let task = tokio::spawn(controller_loop(controller, command_rx, tick_rx, status_tx));

    ControllerLink {
        commands: command_tx,
        snapshot_rx,
        status_rx,
        task,
    }
}
