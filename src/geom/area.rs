use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::geom::{close_ring, open_ring, validate_coordinates, LatLng};

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude (≈ 111.19 km).
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * PI / 180.0;

/// Planar approximation of a ring's area in km².
///
/// The ring is treated as Cartesian `(lng, lat)` points, its shoelace area in
/// square degrees is scaled by km-per-degree of latitude and of longitude at
/// the ring's mean latitude. Good for regions spanning tens of km and cheap
/// enough to run on every drawing update.
///
/// Returns `0.0` when fewer than three valid points remain.
pub fn planar_area(coordinates: &[LatLng]) -> f64 {
    let valid = validate_coordinates(coordinates);
    if valid.len() < 3 {
        if !coordinates.is_empty() { debug!(valid = valid.len(), "not enough valid coordinates for area"); }
        return 0.0;
    }

    let ring = close_ring(&valid);
    let square_degrees = ring.windows(2)
        .map(|w| w[0].lng * w[1].lat - w[1].lng * w[0].lat)
        .sum::<f64>()
        .abs() / 2.0;

    let vertices = open_ring(&ring);
    let mean_lat = vertices.iter().map(|p| p.lat).sum::<f64>() / vertices.len() as f64;
    let km_per_degree_lng = KM_PER_DEGREE * mean_lat.to_radians().cos();

    (square_degrees * KM_PER_DEGREE * km_per_degree_lng).max(0.0)
}

/// Spherical-excess area of a ring in km².
///
/// Each edge contributes the excess of the spherical triangle it forms with
/// the north pole, from tangent half-angle terms of its latitudes and
/// longitude delta. Rings that wind around a pole are corrected by 2π.
/// Non-finite intermediate results fall back to [`planar_area`].
///
/// Returns `0.0` when fewer than three valid points remain.
pub fn spherical_area(coordinates: &[LatLng]) -> f64 {
    let valid = validate_coordinates(coordinates);
    if valid.len() < 3 { return 0.0 }

    let n = valid.len();
    let mut excess = 0.0;
    for i in 0..n {
        let (a, b) = (valid[i], valid[(i + 1) % n]);
        let t1 = (a.lat.to_radians() / 2.0).tan();
        let t2 = (b.lat.to_radians() / 2.0).tan();
        let half_dlng = (b.lng - a.lng).to_radians() / 2.0;
        excess += 2.0 * (half_dlng.tan() * (t1 + t2)).atan2(1.0 + t1 * t2);
    }

    if encloses_pole(&valid) {
        excess = excess.abs() - 2.0 * PI;
    }

    let area = (excess * EARTH_RADIUS_KM * EARTH_RADIUS_KM).abs();
    if area.is_finite() {
        area
    } else {
        warn!(points = n, "spherical area degenerate, falling back to planar area");
        planar_area(coordinates)
    }
}

/// A ring encloses a pole when its longitudes wind a full turn around the globe.
fn encloses_pole(ring: &[LatLng]) -> bool {
    // Longitude winding, not a ray cast toward the pole: a ray cast misclassifies small rings.
    let n = ring.len();
    let winding: f64 = (0..n)
        .map(|i| {
            let mut delta = ring[(i + 1) % n].lng - ring[i].lng;
            if delta > 180.0 { delta -= 360.0 }
            if delta < -180.0 { delta += 360.0 }
            delta
        })
        .sum();
    winding.abs() > 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat: f64, lng: f64, side: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(lat, lng),
            LatLng::new(lat, lng + side),
            LatLng::new(lat + side, lng + side),
            LatLng::new(lat + side, lng),
        ]
    }

    fn rel_close(a: f64, b: f64, tol: f64) -> bool { ((a - b) / b).abs() < tol }

    #[test]
    fn fewer_than_three_valid_points_is_zero() {
        assert_eq!(planar_area(&[]), 0.0);
        assert_eq!(spherical_area(&[]), 0.0);
        let two = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert_eq!(planar_area(&two), 0.0);
        assert_eq!(spherical_area(&two), 0.0);
        let with_nan = [LatLng::new(0.0, 0.0), LatLng::new(f64::NAN, 1.0), LatLng::new(1.0, 1.0)];
        assert_eq!(planar_area(&with_nan), 0.0);
        assert_eq!(spherical_area(&with_nan), 0.0);
    }

    #[test]
    fn planar_matches_degree_scaling() {
        let ring = square(0.0, 10.0, 0.01);
        let mean_lat: f64 = 0.005;
        let expected = 0.0001 * KM_PER_DEGREE * KM_PER_DEGREE * mean_lat.to_radians().cos();
        assert!(rel_close(planar_area(&ring), expected, 0.01));
    }

    #[test]
    fn spherical_agrees_with_planar_for_small_regions() {
        let ring = square(45.0, 7.0, 0.05);
        assert!(rel_close(spherical_area(&ring), planar_area(&ring), 0.01));
    }

    #[test]
    fn explicit_closure_does_not_change_area() {
        let ring = square(52.0, 4.0, 0.1);
        let closed = close_ring(&ring);
        assert!((planar_area(&ring) - planar_area(&closed)).abs() < 1e-9);
        assert!((spherical_area(&ring) - spherical_area(&closed)).abs() < 1e-9);
    }

    #[test]
    fn reversed_ring_has_same_area() {
        let ring = vec![LatLng::new(10.0, 10.0), LatLng::new(10.2, 10.05), LatLng::new(10.1, 10.3), LatLng::new(9.95, 10.2)];
        let mut reversed = ring.clone();
        reversed.reverse();
        assert!((planar_area(&ring) - planar_area(&reversed)).abs() < 1e-9);
        assert!((spherical_area(&ring) - spherical_area(&reversed)).abs() < 1e-6);
    }

    #[test]
    fn polar_cap_is_corrected() {
        // Ring at 80°N going all the way round: the cap above it.
        let ring: Vec<LatLng> = (0..36).map(|i| LatLng::new(80.0, -180.0 + 10.0 * i as f64)).collect();
        assert!(encloses_pole(&ring));
        let cap = 2.0 * PI * EARTH_RADIUS_KM * EARTH_RADIUS_KM * (1.0 - 80f64.to_radians().sin());
        assert!(rel_close(spherical_area(&ring), cap, 0.02));
    }

    #[test]
    fn ordinary_ring_does_not_enclose_pole() {
        assert!(!encloses_pole(&square(60.0, 170.0, 5.0)));
    }
}
