#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sample::{MapPoint, Pose, TrailPoint};
use crate::session::SessionState;

/// Everything a renderer needs for one frame, copied out at a single instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub pose: Pose,
    /// Trail points, oldest first.
    pub trail: Vec<TrailPoint>,
    /// Map points in insertion order.
    pub map: Vec<MapPoint>,
    pub session: SessionState,
}
