use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RadarError>;

/// Why a telemetry line could not be turned into an event.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Field `{field}` is not a number: {token:?}")]
    InvalidNumber { field: &'static str, token: String },
    #[error("Field `{field}` is not finite")]
    NonFiniteNumber { field: &'static str },
    #[error("Expected {expected} fields but found {actual}")]
    WrongFieldCount { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RadarError {
    /// Errors that come from the link rather than from the configuration.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, RadarError::Serial(_) | RadarError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = DecodeError::InvalidNumber {
            field: "angle",
            token: "abc".to_string(),
        };
        assert_eq!(e.to_string(), "Field `angle` is not a number: \"abc\"");

        let e = RadarError::InvalidConfig("store.map_capacity must be > 0".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid configuration: store.map_capacity must be > 0"
        );
        assert!(!e.is_connection_error());

        let e = RadarError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(e.to_string(), "I/O error: gone");
        assert!(e.is_connection_error());
    }
}
