#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Scan session bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionState {
    /// A scan is in progress (between `SCAN_START` and `SCAN_END`).
    pub scanning: bool,
    /// Number of scans started since the last reset.
    pub scan_count: u64,
    /// When an error was last reported to the consumer.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub last_error_at: Option<Instant>,
}
