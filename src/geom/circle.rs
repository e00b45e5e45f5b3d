use std::f64::consts::PI;

use crate::geom::LatLng;

/// Vertices used for a drawn circle unless configured otherwise.
pub const CIRCLE_POINTS: usize = 20;

/// Metres per degree used by the flat-Earth circle approximation.
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Approximate a circle by `point_count` evenly spaced vertices (open ring).
///
/// Flat-Earth: the latitude offset is `radius / 111 km`, the longitude offset
/// is the same scaled by `1 / cos(center latitude)`. A non-finite or negative
/// radius, or a center on a pole, yields an empty ring; fewer than 3 points
/// are raised to 3.
pub fn approximate_circle(center: LatLng, radius_m: f64, point_count: usize) -> Vec<LatLng> {
    if !center.is_valid() || !radius_m.is_finite() || radius_m < 0.0 { return Vec::new() }

    let n = point_count.max(3);
    let dlat = radius_m / METERS_PER_DEGREE;
    let dlng = radius_m / (METERS_PER_DEGREE * center.lat.to_radians().cos());
    // cos(90°) is ~6e-17 in floating point, not zero
    if center.lat.abs() >= 90.0 || !dlng.is_finite() { return Vec::new() }

    (0..n)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / n as f64;
            LatLng::new(center.lat + dlat * angle.cos(), center.lng + dlng * angle.sin())
        })
        .collect()
}
