#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the near band, in centimeters.
pub const NEAR_LIMIT: f64 = 50.;
/// Upper bound (exclusive) of the mid band, in centimeters.
pub const MID_LIMIT: f64 = 100.;

/// Coarse proximity class of a reading, used to colour map points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistanceBand {
    /// Closer than 50cm
    Near,
    /// Between 50cm and 100cm
    Mid,
    /// 100cm and beyond
    Far,
}

impl DistanceBand {
    pub fn of(distance: f64) -> DistanceBand {
        if distance < NEAR_LIMIT {
            DistanceBand::Near
        } else if distance < MID_LIMIT {
            DistanceBand::Mid
        } else {
            DistanceBand::Far
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(DistanceBand::of(0.5), DistanceBand::Near);
        assert_eq!(DistanceBand::of(49.99), DistanceBand::Near);
        assert_eq!(DistanceBand::of(50.), DistanceBand::Mid);
        assert_eq!(DistanceBand::of(99.9), DistanceBand::Mid);
        assert_eq!(DistanceBand::of(100.), DistanceBand::Far);
    }
}
