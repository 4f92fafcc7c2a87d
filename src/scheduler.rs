//! Recurring tick scheduling
//!
//! The controller asks a [`Scheduler`] for a repeating tick on start and keeps
//! the returned [`TickHandle`]. Dropping or cancelling the handle ends the
//! schedule. Every tick carries the [`TickId`] of the schedule that produced
//! it, so the controller can reject ticks from a schedule it already cancelled.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Period of the countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one recurring schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

impl TickId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Owned handle to a running schedule; cancelled when dropped
pub struct TickHandle {
    id: TickId,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new<F>(id: TickId, cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> TickId {
        self.id
    }

    /// Stop the schedule. No tick with this id is produced afterwards.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            debug!("Cancelling {}", self.id);
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("id", &self.id)
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Source of recurring ticks
pub trait Scheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle;
}

/// Scheduler backed by tokio timers
///
/// Each schedule is a spawned task that pushes its id into `tx` once per
/// period. The first tick arrives one full period after scheduling.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TickId>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<TickId>) -> Self {
        Self { tx, next_id: 0 }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let id = TickId::new(self.next_id);
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(id).is_err() {
                    debug!("Tick receiver closed, ending {}", id);
                    break;
                }
            }
        });

        debug!("Scheduled {} every {:?}", id, period);
        TickHandle::new(id, move || task.abort())
    }
}

#[derive(Debug, Default)]
struct ManualLog {
    next_id: u64,
    live: Vec<TickId>,
    scheduled: Vec<(TickId, Duration)>,
    cancelled: Vec<TickId>,
}

/// Scheduler that never fires on its own
///
/// Clones share one log, so a test can keep a copy after handing the
/// scheduler to a controller and then deliver ticks by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    log: Arc<Mutex<ManualLog>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, ManualLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The most recent schedule that has not been cancelled
    pub fn live(&self) -> Option<TickId> {
        self.log().live.last().copied()
    }

    pub fn scheduled(&self) -> Vec<(TickId, Duration)> {
        self.log().scheduled.clone()
    }

    pub fn cancelled(&self) -> Vec<TickId> {
        self.log().cancelled.clone()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle {
        let id = {
            let mut log = self.log();
            log.next_id += 1;
            let id = TickId::new(log.next_id);
            log.live.push(id);
            log.scheduled.push((id, period));
            id
        };

        let log = Arc::clone(&self.log);
        TickHandle::new(id, move || {
            let mut log = log.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            log.live.retain(|live| *live != id);
            log.cancelled.push(id);
        })
    }
}
