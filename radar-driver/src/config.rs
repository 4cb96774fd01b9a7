//! Runtime configuration, loadable from TOML.
//!
//! Every key is optional; missing keys take the defaults observed on the
//! reference robot firmware.

use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_ERROR_COOLDOWN_MS, DEFAULT_MAP_CAPACITY, DEFAULT_MAX_DISTANCE,
    DEFAULT_READ_TIMEOUT_MS, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TRAIL_DECAY, DEFAULT_TRAIL_FLOOR, DEFAULT_WRAP_THRESHOLD,
};
use crate::error::{RadarError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadarConfig {
    pub link: LinkConfig,
    pub store: StoreConfig,
    pub ticker: TickerConfig,
    pub reporting: ReportingConfig,
}

/// Serial link parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkConfig {
    pub baud_rate: u32,
    /// Upper bound on a single blocking read. Also bounds how long a disconnect waits.
    pub read_timeout_ms: u64,
    /// Wait after opening the port before trusting its input.
    pub settle_delay_ms: u64,
}

/// Spatial store parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of map points kept; the oldest are evicted first.
    pub map_capacity: usize,
    /// Readings at or beyond this distance (cm) are rejected.
    pub max_distance: f64,
    /// Factor applied to every trail intensity on each tick.
    pub trail_decay: f64,
    /// Trail points at or below this intensity are dropped.
    pub trail_floor: f64,
    /// Take an angle at or below `wrap_threshold` as the start of a new sweep
    /// and clear the map before storing it.
    pub clear_on_wrap: bool,
    pub wrap_threshold: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TickerConfig {
    pub interval_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Minimum spacing between two error notices.
    pub error_cooldown_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            map_capacity: DEFAULT_MAP_CAPACITY,
            max_distance: DEFAULT_MAX_DISTANCE,
            trail_decay: DEFAULT_TRAIL_DECAY,
            trail_floor: DEFAULT_TRAIL_FLOOR,
            clear_on_wrap: true,
            wrap_threshold: DEFAULT_WRAP_THRESHOLD,
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        ReportingConfig {
            error_cooldown_ms: DEFAULT_ERROR_COOLDOWN_MS,
        }
    }
}

impl LinkConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl TickerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ReportingConfig {
    pub fn error_cooldown(&self) -> Duration {
        Duration::from_millis(self.error_cooldown_ms)
    }
}

impl RadarConfig {
    /// Loads and validates a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RadarConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Err(RadarError::InvalidConfig(message.to_string()));
        let store = &self.store;
        if self.link.baud_rate == 0 {
            return invalid("link.baud_rate must be > 0");
        }
        if self.link.read_timeout_ms == 0 {
            return invalid("link.read_timeout_ms must be > 0");
        }
        if store.map_capacity == 0 {
            return invalid("store.map_capacity must be > 0");
        }
        if !(store.max_distance > 0.) {
            return invalid("store.max_distance must be > 0");
        }
        if !(store.trail_decay > 0. && store.trail_decay < 1.) {
            return invalid("store.trail_decay must be in (0, 1)");
        }
        if !(store.trail_floor > 0. && store.trail_floor < 1.) {
            return invalid("store.trail_floor must be in (0, 1)");
        }
        if self.ticker.interval_ms == 0 {
            return invalid("ticker.interval_ms must be > 0");
        }
        Ok(())
    }
}
