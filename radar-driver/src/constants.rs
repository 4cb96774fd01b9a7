pub(crate) const DEFAULT_BAUD_RATE: u32 = 9600;
pub(crate) const DEFAULT_READ_TIMEOUT_MS: u64 = 500;
// The board resets when the port opens and prints garbage until it settles
pub(crate) const DEFAULT_SETTLE_DELAY_MS: u64 = 2000;
pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
pub(crate) const DEFAULT_ERROR_COOLDOWN_MS: u64 = 5000;

pub(crate) const DEFAULT_MAP_CAPACITY: usize = 2000;
// Specific for the ultrasonic sensor, in cm
pub(crate) const DEFAULT_MAX_DISTANCE: f64 = 400.;
pub(crate) const DEFAULT_TRAIL_DECAY: f64 = 0.90;
pub(crate) const DEFAULT_TRAIL_FLOOR: f64 = 0.05;
pub(crate) const DEFAULT_WRAP_THRESHOLD: i32 = 7;

pub(crate) const MIN_LINE_LENGTH: usize = 3;
pub(crate) const MAX_LINE_LENGTH: usize = 256;
pub(crate) const READ_CHUNK_SIZE: usize = 64;
pub(crate) const N_BUFFERED_CHUNKS: usize = 200;
pub(crate) const N_BUFFERED_NOTICES: usize = 256;
pub(crate) const PARSER_POLL_MS: u64 = 10;
