//! Polar to Cartesian conversion shared by the sweep and map views.

/// Rotation applied so that 0° maps to "up" on screen.
pub const REFERENCE_ROTATION_DEGREE: f64 = -90.;

/// Margin applied by [`map_scale`] so points near the range limit stay inside the view.
pub const MAP_MARGIN: f64 = 0.85;

pub fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Projects a polar reading around the sensor origin.
///
/// `x = distance * scale * cos(radians(angle) - π/2)`,
/// `y = distance * scale * sin(radians(angle) - π/2)`.
/// Screen coordinates grow downwards, so 90° lands on the right and 180° at the bottom.
pub fn project(angle_degree: i32, distance: f64, scale: f64) -> (f64, f64) {
    let w = degree_to_radian(angle_degree as f64 + REFERENCE_ROTATION_DEGREE);
    let r = distance * scale;
    (r * f64::cos(w), r * f64::sin(w))
}

/// Scale that maps `max_distance` onto the radius of the sweep view.
pub fn radar_scale(radius: f64, max_distance: f64) -> f64 {
    radius / max_distance
}

/// Scale that fits a `2 * max_distance` square into a `width` x `height` map view.
pub fn map_scale(width: f64, height: f64, max_distance: f64) -> f64 {
    f64::min(width, height) / (2. * max_distance) * MAP_MARGIN
}
