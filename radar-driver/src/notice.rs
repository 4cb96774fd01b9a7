use std::fmt;

/// Something the consumer's event log should show.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Connected(String),
    Disconnected,
    /// The link failed and was closed.
    ConnectionLost(String),
    RobotReady,
    RobotStarted,
    RobotStopped,
    ScanStarted { scan_count: u64 },
    ScanEnded { measurements: Option<u32> },
    Obstacle,
    Metre,
    AutoScan,
    /// Unknown `EVENT` or `STATUS` name
    Unknown(String),
    /// `INFO` line, verbatim
    Info(String),
    MapReset,
    /// Throttled error report
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::Connected(port) => write!(f, "Connected to {}", port),
            Notice::Disconnected => write!(f, "Disconnected"),
            Notice::ConnectionLost(reason) => write!(f, "Connection lost: {}", reason),
            Notice::RobotReady => write!(f, "Robot ready"),
            Notice::RobotStarted => write!(f, "Robot started"),
            Notice::RobotStopped => write!(f, "Robot stopped"),
            Notice::ScanStarted { scan_count } => write!(f, "Scan #{} started", scan_count),
            Notice::ScanEnded {
                measurements: Some(n),
            } => write!(f, "Scan finished: {} measurements", n),
            Notice::ScanEnded { measurements: None } => write!(f, "Scan finished"),
            Notice::Obstacle => write!(f, "Obstacle detected"),
            Notice::Metre => write!(f, "One metre travelled"),
            Notice::AutoScan => write!(f, "Automatic scan triggered"),
            Notice::Unknown(name) => write!(f, "Unknown message {}", name),
            Notice::Info(text) => write!(f, "{}", text),
            Notice::MapReset => write!(f, "Map reset"),
            Notice::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
