//! Session and spatial state behind one lock.

use crate::config::RadarConfig;
use crate::decoder::decode;
use crate::notice::Notice;
use crate::session::{SessionMachine, Transition};
use crate::store::SpatialStore;
use parking_lot::Mutex;
use radar_data::{EventKind, Snapshot, StatusKind, TelemetryEvent};
use std::sync::Arc;
use std::time::Instant;

pub(crate) type SharedModel = Arc<Mutex<RadarModel>>;

/// Everything the reader and the ticker share. Each method is one atomic
/// step when called through a [`SharedModel`] guard.
pub struct RadarModel {
    store: SpatialStore,
    session: SessionMachine,
}

impl RadarModel {
    pub fn new(config: &RadarConfig) -> RadarModel {
        RadarModel {
            store: SpatialStore::new(config.store.clone()),
            session: SessionMachine::new(config.reporting.error_cooldown()),
        }
    }

    pub(crate) fn shared(config: &RadarConfig) -> SharedModel {
        Arc::new(Mutex::new(RadarModel::new(config)))
    }

    pub fn store(&self) -> &SpatialStore {
        &self.store
    }

    pub fn session(&self) -> &SessionMachine {
        &self.session
    }

    /// Decodes and applies one line. Decode failures change nothing and
    /// are reported at most once per cooldown window.
    pub fn apply_line(&mut self, line: &str, now: Instant) -> Option<Notice> {
        match decode(line) {
            Ok(event) => self.apply(&event),
            Err(e) => {
                log::debug!("Dropping line {:?}: {}", line, e);
                self.report_error(format!("{} in {:?}", e, line), now)
            }
        }
    }

    pub fn apply(&mut self, event: &TelemetryEvent) -> Option<Notice> {
        match event {
            TelemetryEvent::Measurement(sample) => {
                if self.store.apply_measurement(*sample) {
                    log::trace!("Angle: {}° Distance: {}cm", sample.angle, sample.distance);
                }
                None
            }
            TelemetryEvent::Event(kind) => {
                if kind.clears_map() {
                    self.store.clear_map();
                }
                let notice = match kind {
                    EventKind::Obstacle => Notice::Obstacle,
                    EventKind::Metre => Notice::Metre,
                    EventKind::AutoScan => Notice::AutoScan,
                    EventKind::Other(name) => Notice::Unknown(format!("EVENT:{}", name)),
                };
                log::info!("{}", notice);
                Some(notice)
            }
            TelemetryEvent::Status(status) => {
                let notice = match self.session.apply_status(status) {
                    Transition::ScanStarted { scan_count } => {
                        self.store.clear_map();
                        Notice::ScanStarted { scan_count }
                    }
                    Transition::ScanEnded { measurements } => Notice::ScanEnded { measurements },
                    Transition::Informational => match status {
                        StatusKind::Ready => Notice::RobotReady,
                        StatusKind::Started => Notice::RobotStarted,
                        StatusKind::Stopped => Notice::RobotStopped,
                        other => Notice::Unknown(format!("STATUS:{}", other.name())),
                    },
                };
                log::info!("{}", notice);
                Some(notice)
            }
            TelemetryEvent::Info(text) => {
                log::info!("{}", text);
                Some(Notice::Info(text.clone()))
            }
            TelemetryEvent::Unrecognized => None,
        }
    }

    /// Throttled error report. Returns the notice to forward, if any.
    pub fn report_error(&mut self, message: String, now: Instant) -> Option<Notice> {
        if !self.session.should_report_error(now) {
            return None;
        }
        log::warn!("{}", message);
        Some(Notice::Error(message))
    }

    /// User requested reset: empty map and zero scan count.
    pub fn reset_map(&mut self) -> Notice {
        self.store.clear_map();
        self.session.reset();
        log::info!("Map reset");
        Notice::MapReset
    }

    pub(crate) fn on_connect(&mut self) {
        self.session.on_connect();
    }

    /// One ticker step: age the trail, then copy out the frame.
    pub fn tick(&mut self) -> Snapshot {
        self.store.age_trail();
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pose: self.store.pose(),
            trail: self.store.trail(),
            map: self.store.map(),
            session: self.session.state(),
        }
    }
}
