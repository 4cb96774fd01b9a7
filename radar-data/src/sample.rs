#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projection::project;

/// One angle/distance reading from the sensor.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Bearing in whole degrees, in `[0, 360)`.
    pub angle: i32,
    /// Distance to the echo in centimeters.
    pub distance: f64,
}

impl Sample {
    pub fn new(angle: i32, distance: f64) -> Sample {
        Sample { angle, distance }
    }

    /// Cartesian offset of this sample from the sensor origin, 0° pointing up.
    pub fn to_cartesian(&self, scale: f64) -> (f64, f64) {
        project(self.angle, self.distance, scale)
    }
}

/// The most recent sample. Overwritten on every accepted measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub angle: i32,
    pub distance: f64,
}

impl Pose {
    /// A pose that has never seen a measurement has a zero distance.
    pub fn is_empty(&self) -> bool {
        self.distance == 0.
    }
}

impl From<Sample> for Pose {
    fn from(sample: Sample) -> Pose {
        Pose {
            angle: sample.angle,
            distance: sample.distance,
        }
    }
}

/// A recent sample fading out of the sweep view.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrailPoint {
    pub sample: Sample,
    /// Recency in `(0, 1]`. Starts at 1.0 and decays every tick.
    pub intensity: f64,
}

impl TrailPoint {
    pub fn fresh(sample: Sample) -> TrailPoint {
        TrailPoint {
            sample,
            intensity: 1.,
        }
    }
}

/// A sample kept in the accumulated map. Never mutated once stored.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapPoint {
    pub sample: Sample,
}

impl From<Sample> for MapPoint {
    fn from(sample: Sample) -> MapPoint {
        MapPoint { sample }
    }
}
