use radar_data::{SessionState, StatusKind};
use std::time::{Duration, Instant};

/// What the rest of the driver has to do after a status transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A new scan began; the map must be cleared.
    ScanStarted { scan_count: u64 },
    /// The running scan ended.
    ScanEnded { measurements: Option<u32> },
    /// Informational status, state unchanged.
    Informational,
}

/// Idle/scanning state machine plus the error report throttle.
pub struct SessionMachine {
    state: SessionState,
    error_cooldown: Duration,
}

impl SessionMachine {
    pub fn new(error_cooldown: Duration) -> SessionMachine {
        SessionMachine {
            state: SessionState::default(),
            error_cooldown,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    pub fn is_scanning(&self) -> bool {
        self.state.scanning
    }

    pub fn apply_status(&mut self, status: &StatusKind) -> Transition {
        match status {
            StatusKind::ScanStart => {
                self.state.scanning = true;
                self.state.scan_count += 1;
                Transition::ScanStarted {
                    scan_count: self.state.scan_count,
                }
            }
            StatusKind::ScanEnd(measurements) => {
                self.state.scanning = false;
                Transition::ScanEnded {
                    measurements: *measurements,
                }
            }
            StatusKind::Ready | StatusKind::Started | StatusKind::Stopped | StatusKind::Other(_) => {
                Transition::Informational
            }
        }
    }

    /// A fresh link starts idle. The scan count survives reconnection.
    pub fn on_connect(&mut self) {
        self.state.scanning = false;
    }

    /// Zeroes the scan count. This is the only place it goes down.
    pub fn reset(&mut self) {
        self.state.scan_count = 0;
    }

    /// Returns `true` if an error occurring at `now` should be reported,
    /// i.e. no error was reported within the cooldown window.
    pub fn should_report_error(&mut self, now: Instant) -> bool {
        let report = match self.state.last_error_at {
            Some(last) => now.saturating_duration_since(last) > self.error_cooldown,
            None => true,
        };
        if report {
            self.state.last_error_at = Some(now);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> SessionMachine {
        SessionMachine::new(Duration::from_secs(5))
    }

    #[test]
    fn test_scan_cycle() {
        let mut session = machine();
        assert!(!session.is_scanning());

        assert_eq!(
            session.apply_status(&StatusKind::ScanStart),
            Transition::ScanStarted { scan_count: 1 }
        );
        assert!(session.is_scanning());

        assert_eq!(
            session.apply_status(&StatusKind::ScanEnd(Some(360))),
            Transition::ScanEnded {
                measurements: Some(360)
            }
        );
        assert!(!session.is_scanning());
        assert_eq!(session.state().scan_count, 1);

        session.apply_status(&StatusKind::ScanStart);
        session.apply_status(&StatusKind::ScanEnd(None));
        assert_eq!(session.state().scan_count, 2);
    }

    #[test]
    fn test_informational_status() {
        let mut session = machine();
        session.apply_status(&StatusKind::ScanStart);
        for status in [
            StatusKind::Ready,
            StatusKind::Started,
            StatusKind::Stopped,
            StatusKind::Other("CHARGING".to_string()),
        ] {
            assert_eq!(session.apply_status(&status), Transition::Informational);
        }
        assert!(session.is_scanning());
        assert_eq!(session.state().scan_count, 1);
    }

    #[test]
    fn test_reconnect_and_reset() {
        let mut session = machine();
        session.apply_status(&StatusKind::ScanStart);
        session.apply_status(&StatusKind::ScanStart);

        session.on_connect();
        assert!(!session.is_scanning());
        assert_eq!(session.state().scan_count, 2);

        session.reset();
        assert_eq!(session.state().scan_count, 0);
    }

    #[test]
    fn test_error_throttle() {
        let mut session = machine();
        let t0 = Instant::now();
        assert!(session.should_report_error(t0));
        assert_eq!(session.state().last_error_at, Some(t0));
        assert!(!session.should_report_error(t0 + Duration::from_secs(1)));
        assert!(!session.should_report_error(t0 + Duration::from_secs(5)));
        assert_eq!(session.state().last_error_at, Some(t0));
        assert!(session.should_report_error(t0 + Duration::from_millis(5001)));
    }
}
