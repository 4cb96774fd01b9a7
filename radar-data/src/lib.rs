pub mod distance_band;
pub mod event;
pub mod projection;
pub mod sample;
pub mod session;
pub mod snapshot;

pub use distance_band::DistanceBand;
pub use event::{EventKind, StatusKind, TelemetryEvent};
pub use projection::{degree_to_radian, map_scale, project, radar_scale};
pub use sample::{MapPoint, Pose, Sample, TrailPoint};
pub use session::SessionState;
pub use snapshot::Snapshot;

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serde() {
        let snapshot = Snapshot {
            pose: Pose {
                angle: 30,
                distance: 75.5,
            },
            trail: vec![TrailPoint::fresh(Sample::new(30, 75.5))],
            map: vec![MapPoint::from(Sample::new(30, 75.5))],
            session: SessionState {
                scanning: true,
                scan_count: 2,
                last_error_at: None,
            },
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("last_error_at"));
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_event_serde() {
        let event = TelemetryEvent::Status(StatusKind::ScanEnd(Some(360)));
        let json = serde_json::to_string(&event).unwrap();
        let decoded: TelemetryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
