//! End-of-countdown alarm

use tracing::{debug, info};

use crate::view::SnapshotSender;

/// Default alarm sound served to clients
pub const DEFAULT_ALARM_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

/// A sound played once when a countdown completes
///
/// Playback is fire-and-forget: implementations report nothing back.
pub trait Alarm {
    fn play(&mut self);
    fn stop(&mut self);
    fn rewind(&mut self);
}

/// Alarm played by the remote client
///
/// The server cannot make sound itself, so it publishes the play/stop
/// requests in the snapshot and the browser page drives its audio element.
#[derive(Debug, Clone)]
pub struct RemoteAlarm {
    tx: SnapshotSender,
}

impl RemoteAlarm {
    pub fn new(tx: SnapshotSender) -> Self {
        Self { tx }
    }
}

impl Alarm for RemoteAlarm {
    fn play(&mut self) {
        self.tx.send_modify(|snapshot| {
            snapshot.alarm.playing = true;
            snapshot.alarm.rewound = false;
            snapshot.alarm.plays += 1;
            info!("Alarm requested (play #{}) from {}", snapshot.alarm.plays, snapshot.alarm.source);
        });
    }

    fn stop(&mut self) {
        debug!("Alarm stop requested");
        self.tx.send_modify(|snapshot| snapshot.alarm.playing = false);
    }

    fn rewind(&mut self) {
        debug!("Alarm rewind requested");
        self.tx.send_modify(|snapshot| snapshot.alarm.rewound = true);
    }
}
