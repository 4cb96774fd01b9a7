#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sample::Sample;

/// One decoded line of telemetry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TelemetryEvent {
    /// An angle/distance reading
    Measurement(Sample),
    /// `EVENT:<name>`
    Event(EventKind),
    /// `STATUS:<name>[:<payload>]`
    Status(StatusKind),
    /// `INFO:<text>`, passed through for logging
    Info(String),
    /// Too short or no known prefix
    Unrecognized,
}

/// Notable events reported by the robot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// An obstacle was detected
    Obstacle,
    /// The robot travelled one metre
    Metre,
    /// The robot started an automatic scan
    AutoScan,
    /// Any other event name
    Other(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> EventKind {
        match name {
            "OBSTACLE" => EventKind::Obstacle,
            "METRE" => EventKind::Metre,
            "AUTO_SCAN" => EventKind::AutoScan,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Events after which the accumulated map no longer describes the surroundings.
    pub fn clears_map(&self) -> bool {
        matches!(
            self,
            EventKind::Obstacle | EventKind::Metre | EventKind::AutoScan
        )
    }
}

/// Session status markers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusKind {
    ScanStart,
    /// End of a scan, with the measurement count when the firmware reports it
    ScanEnd(Option<u32>),
    Ready,
    Started,
    Stopped,
    /// Any other status name
    Other(String),
}

impl StatusKind {
    /// Name as spelled on the wire, without payload.
    pub fn name(&self) -> &str {
        match self {
            StatusKind::ScanStart => "SCAN_START",
            StatusKind::ScanEnd(_) => "SCAN_END",
            StatusKind::Ready => "READY",
            StatusKind::Started => "STARTED",
            StatusKind::Stopped => "STOPPED",
            StatusKind::Other(name) => name,
        }
    }
}
