//! Pose, fading trail and bounded map.
//!
//! `SpatialStore` itself is a plain single-owner value. The driver keeps it
//! behind the same lock as the session state so that every operation here
//! is applied atomically with respect to readers.

use crate::config::StoreConfig;
use radar_data::{MapPoint, Pose, Sample, TrailPoint};
use std::collections::VecDeque;

/// Whether a sample at `angle` looks like the start of a new sweep.
///
/// This assumes the angle grows monotonically within a sweep and restarts
/// near 0°. Sensor jitter around 0° clears the map more than once.
pub fn sweep_restarted(angle: i32, wrap_threshold: i32) -> bool {
    angle <= wrap_threshold
}

pub struct SpatialStore {
    config: StoreConfig,
    pose: Pose,
    trail: Vec<TrailPoint>,
    map: VecDeque<MapPoint>,
}

impl SpatialStore {
    pub fn new(config: StoreConfig) -> SpatialStore {
        SpatialStore {
            config,
            pose: Pose::default(),
            trail: Vec::new(),
            map: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn in_range(&self, distance: f64) -> bool {
        distance > 0. && distance < self.config.max_distance
    }

    /// Records one reading.
    ///
    /// Returns `false` without touching any state when `distance` is outside
    /// `(0, max_distance)`.
    pub fn apply_measurement(&mut self, sample: Sample) -> bool {
        if !self.in_range(sample.distance) {
            return false;
        }

        self.pose = Pose::from(sample);
        self.trail.push(TrailPoint::fresh(sample));

        if self.config.clear_on_wrap && sweep_restarted(sample.angle, self.config.wrap_threshold) {
            self.map.clear();
        }
        self.map.push_back(MapPoint::from(sample));
        while self.map.len() > self.config.map_capacity {
            self.map.pop_front();
        }
        true
    }

    /// Empties the map. Pose and trail are left alone.
    pub fn clear_map(&mut self) {
        self.map.clear();
    }

    /// Decays every trail point once and drops those at or below the floor.
    pub fn age_trail(&mut self) {
        let decay = self.config.trail_decay;
        let floor = self.config.trail_floor;
        self.trail.iter_mut().for_each(|p| p.intensity *= decay);
        self.trail.retain(|p| p.intensity > floor);
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn trail(&self) -> Vec<TrailPoint> {
        self.trail.clone()
    }

    pub fn map(&self) -> Vec<MapPoint> {
        self.map.iter().copied().collect()
    }

    pub fn map_len(&self) -> usize {
        self.map.len()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}
