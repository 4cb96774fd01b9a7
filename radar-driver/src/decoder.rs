//! Text line to [`TelemetryEvent`] decoding.
//!
//! Firmware revisions disagree on how a measurement is spelled, so every
//! accepted shape is a [`Grammar`] and they are tried in a fixed order.

use crate::constants::MIN_LINE_LENGTH;
use crate::error::DecodeError;
use radar_data::{EventKind, Sample, StatusKind, TelemetryEvent};

const EVENT_PREFIX: &str = "EVENT:";
const STATUS_PREFIX: &str = "STATUS:";
const INFO_PREFIX: &str = "INFO:";

/// Measurement line shapes, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// `A:<float>:D:<float>`
    AngleDistance,
    /// `D:<int>:<float>`
    Distance,
    /// `A:<int>,D:<int>`
    Comma,
}

pub const GRAMMARS: [Grammar; 3] = [Grammar::AngleDistance, Grammar::Distance, Grammar::Comma];

impl Grammar {
    fn matches(&self, line: &str) -> bool {
        match self {
            Grammar::AngleDistance => line.starts_with("A:") && line.contains(":D:"),
            Grammar::Distance => line.starts_with("D:"),
            Grammar::Comma => line.starts_with("A:") && line.contains(",D:"),
        }
    }

    fn parse(&self, line: &str) -> Result<Sample, DecodeError> {
        match self {
            Grammar::AngleDistance => {
                let fields = split_exact(line, ':', 4)?;
                let angle = truncate_angle(parse_float(fields[1], "angle")?);
                let distance = parse_float(fields[3], "distance")?;
                Ok(sample(angle, distance))
            }
            Grammar::Distance => {
                let fields = split_exact(line, ':', 3)?;
                let angle = parse_int(fields[1], "angle")?;
                let distance = parse_float(fields[2], "distance")?;
                Ok(sample(angle, distance))
            }
            Grammar::Comma => {
                let fields = split_exact(line, ',', 2)?;
                let angle = parse_int(strip_tag(fields[0], "A:"), "angle")?;
                let distance = parse_int(strip_tag(fields[1], "D:"), "distance")?;
                Ok(sample(angle, distance as f64))
            }
        }
    }
}

/// Decodes one line with its terminator already removed.
///
/// Lines that are too short or carry an unknown prefix decode to
/// [`TelemetryEvent::Unrecognized`]. Only a recognised line with malformed
/// fields is an error.
pub fn decode(line: &str) -> Result<TelemetryEvent, DecodeError> {
    let line = line.trim();
    if line.len() < MIN_LINE_LENGTH {
        return Ok(TelemetryEvent::Unrecognized);
    }

    if let Some(grammar) = GRAMMARS.iter().find(|g| g.matches(line)) {
        return grammar.parse(line).map(TelemetryEvent::Measurement);
    }
    if let Some(name) = line.strip_prefix(EVENT_PREFIX) {
        return Ok(TelemetryEvent::Event(EventKind::from_name(name)));
    }
    if let Some(status) = line.strip_prefix(STATUS_PREFIX) {
        return Ok(TelemetryEvent::Status(decode_status(status)));
    }
    if line.starts_with(INFO_PREFIX) {
        return Ok(TelemetryEvent::Info(line.to_string()));
    }
    Ok(TelemetryEvent::Unrecognized)
}

fn decode_status(status: &str) -> StatusKind {
    let (name, payload) = match status.split_once(':') {
        Some((name, payload)) => (name, Some(payload)),
        None => (status, None),
    };
    match name {
        "SCAN_START" => StatusKind::ScanStart,
        // the count is only reported, a bad one still ends the scan
        "SCAN_END" => StatusKind::ScanEnd(payload.and_then(|count| match parse_count(count) {
            Ok(count) => Some(count),
            Err(e) => {
                log::debug!("Ignoring scan end payload: {}", e);
                None
            }
        })),
        "READY" => StatusKind::Ready,
        "STARTED" => StatusKind::Started,
        "STOPPED" => StatusKind::Stopped,
        other => StatusKind::Other(other.to_string()),
    }
}

fn split_exact(line: &str, delimiter: char, expected: usize) -> Result<Vec<&str>, DecodeError> {
    let fields = line.split(delimiter).collect::<Vec<_>>();
    if fields.len() != expected {
        return Err(DecodeError::WrongFieldCount {
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

fn strip_tag<'a>(field: &'a str, tag: &str) -> &'a str {
    field.trim().strip_prefix(tag).unwrap_or(field)
}

fn parse_float(token: &str, field: &'static str) -> Result<f64, DecodeError> {
    let value = token
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid_number(token, field))?;
    if !value.is_finite() {
        return Err(DecodeError::NonFiniteNumber { field });
    }
    Ok(value)
}

fn parse_int(token: &str, field: &'static str) -> Result<i32, DecodeError> {
    token
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid_number(token, field))
}

fn parse_count(token: &str) -> Result<u32, DecodeError> {
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid_number(token, "count"))
}

fn invalid_number(token: &str, field: &'static str) -> DecodeError {
    DecodeError::InvalidNumber {
        field,
        token: token.to_string(),
    }
}

fn truncate_angle(angle: f64) -> i32 {
    // `as` saturates, the value is finite at this point
    angle.trunc() as i32
}

fn sample(angle: i32, distance: f64) -> Sample {
    Sample::new(angle.rem_euclid(360), distance)
}
