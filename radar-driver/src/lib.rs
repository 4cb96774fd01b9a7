//! Serial telemetry driver for a rotating ultrasonic radar.
//!
//! Lines from the sensor are decoded into events that drive a scan session
//! state machine and a spatial store (current pose, fading trail, bounded
//! map). A [`Ticker`] ages the trail at a fixed rate and hands snapshots to
//! a renderer.
//!
//! ```no_run
//! use radar_driver::{Radar, RadarConfig};
//!
//! let mut radar = Radar::new(RadarConfig::default())?;
//! radar.connect("/dev/ttyUSB0")?;
//! let _ticker = radar.start_ticker(|snapshot: &radar_data::Snapshot| {
//!     println!("{} map points", snapshot.map.len());
//! });
//! # Ok::<(), radar_driver::RadarError>(())
//! ```

mod config;
mod constants;
mod decoder;
mod error;
mod line;
mod link_threads;
mod model;
mod notice;
mod serial;
mod session;
mod store;
mod ticker;
#[cfg(test)]
mod time;

use crate::link_threads::{notify, spawn_link, LinkThreads, SharedStatus};
use crate::model::SharedModel;
use crate::serial::open_port;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossbeam_utils::atomic::AtomicCell;
use radar_data::{MapPoint, Pose, SessionState, Snapshot, TrailPoint};
use std::sync::Arc;
use std::time::Instant;

pub use crate::config::{LinkConfig, RadarConfig, ReportingConfig, StoreConfig, TickerConfig};
pub use crate::decoder::{decode, Grammar, GRAMMARS};
pub use crate::error::{DecodeError, RadarError, Result};
pub use crate::link_threads::LinkStatus;
pub use crate::model::RadarModel;
pub use crate::notice::Notice;
pub use crate::session::{SessionMachine, Transition};
pub use crate::store::{sweep_restarted, SpatialStore};
pub use crate::ticker::{Renderer, Ticker};

use crate::constants::N_BUFFERED_NOTICES;

/// Handle owned by the UI: connection commands and the read surface.
pub struct Radar {
    config: RadarConfig,
    model: SharedModel,
    status: SharedStatus,
    link: Option<LinkThreads>,
    notice_tx: Sender<Notice>,
    notice_rx: Receiver<Notice>,
}

impl Radar {
    /// Fails with [`RadarError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: RadarConfig) -> Result<Radar> {
        config.validate()?;
        let (notice_tx, notice_rx) = bounded(N_BUFFERED_NOTICES);
        Ok(Radar {
            model: RadarModel::shared(&config),
            config,
            status: Arc::new(AtomicCell::new(LinkStatus::Disconnected)),
            link: None,
            notice_tx,
            notice_rx,
        })
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Opens `port_name` and starts reading telemetry in the background.
    ///
    /// Any previous link is disconnected first, so this is safe to call again
    /// after a failure or while connected. The scan count survives.
    pub fn connect(&mut self, port_name: &str) -> Result<()> {
        self.disconnect();

        let port = match open_port(port_name, &self.config.link) {
            Ok(port) => port,
            Err(e) => {
                let notice = self
                    .model
                    .lock()
                    .report_error(format!("Failed to open {}: {}", port_name, e), Instant::now());
                notify(&self.notice_tx, notice);
                return Err(e);
            }
        };

        self.model.lock().on_connect();
        self.link = Some(spawn_link(
            port,
            self.config.link.settle_delay(),
            Arc::clone(&self.model),
            Arc::clone(&self.status),
            self.notice_tx.clone(),
        ));
        notify(&self.notice_tx, Some(Notice::Connected(port_name.to_string())));
        Ok(())
    }

    /// Stops reading and releases the port. No read happens after this returns.
    pub fn disconnect(&mut self) {
        if self.close_link() {
            log::info!("Disconnected");
            notify(&self.notice_tx, Some(Notice::Disconnected));
        }
    }

    fn close_link(&mut self) -> bool {
        // joins the reader, which owns and drops the port
        let closed = self.link.take().is_some();
        self.status.store(LinkStatus::Disconnected);
        closed
    }

    pub fn link_status(&self) -> LinkStatus {
        self.status.load()
    }

    pub fn is_connected(&self) -> bool {
        self.link_status() == LinkStatus::Connected
    }

    /// Empties the map and zeroes the scan count.
    pub fn reset_map(&self) {
        let notice = self.model.lock().reset_map();
        notify(&self.notice_tx, Some(notice));
    }

    /// Runs one line through the same path as telemetry read from the link.
    pub fn feed_line(&self, line: &str) {
        let notice = self.model.lock().apply_line(line, Instant::now());
        notify(&self.notice_tx, notice);
    }

    /// Receiver for consumer-facing notices. Cloned receivers share the queue.
    pub fn notices(&self) -> Receiver<Notice> {
        self.notice_rx.clone()
    }

    pub fn current_pose(&self) -> Pose {
        self.model.lock().store().pose()
    }

    pub fn trail_snapshot(&self) -> Vec<TrailPoint> {
        self.model.lock().store().trail()
    }

    pub fn map_snapshot(&self) -> Vec<MapPoint> {
        self.model.lock().store().map()
    }

    pub fn session_state(&self) -> SessionState {
        self.model.lock().session().state()
    }

    /// Pose, trail, map and session taken under a single lock.
    pub fn snapshot(&self) -> Snapshot {
        self.model.lock().snapshot()
    }

    /// One ticker step for callers that drive their own frame timer.
    pub fn tick(&self) -> Snapshot {
        self.model.lock().tick()
    }

    /// Starts a background ticker at the configured interval.
    pub fn start_ticker<R: Renderer>(&self, renderer: R) -> Ticker {
        Ticker::spawn(
            Arc::clone(&self.model),
            self.config.ticker.interval(),
            renderer,
        )
    }
}

impl Drop for Radar {
    fn drop(&mut self) {
        self.close_link();
    }
}
