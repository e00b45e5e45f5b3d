use geo::{Centroid, Coord, LineString, Polygon};
use serde_json::Value;

use crate::geom::LatLng;

/// Drop every position with a NaN or infinite component.
pub fn validate_coordinates(coordinates: &[LatLng]) -> Vec<LatLng> {
    coordinates.iter().copied().filter(LatLng::is_valid).collect()
}

/// Lenient decode of an untyped `[[lat, lng], ...]` array.
/// Entries that are not 2-element numeric pairs are dropped, not reported.
pub fn coordinates_from_json(value: &Value) -> Vec<LatLng> {
    let Some(entries) = value.as_array() else { return Vec::new() };

    entries.iter()
        .filter_map(|entry| match entry.as_array().map(Vec::as_slice) {
            Some([lat, lng]) => Some(LatLng::new(lat.as_f64()?, lng.as_f64()?)),
            _ => None,
        })
        .filter(LatLng::is_valid)
        .collect()
}

/// True if the ring has at least two points and its first and last are equal.
#[inline]
pub fn is_closed(ring: &[LatLng]) -> bool {
    ring.len() > 1 && ring.first() == ring.last()
}

/// Copy of `ring` with the first point appended if it is open.
pub fn close_ring(ring: &[LatLng]) -> Vec<LatLng> {
    let mut closed = ring.to_vec();
    if let Some(&first) = ring.first() {
        if !is_closed(ring) { closed.push(first) }
    }
    closed
}

/// The ring without its closing duplicate.
#[inline]
pub fn open_ring(ring: &[LatLng]) -> &[LatLng] {
    if is_closed(ring) { &ring[..ring.len() - 1] } else { ring }
}

/// Signed shoelace area of a closed or open ring in `geo` coordinates,
/// positive for counter-clockwise.
pub fn signed_area(pts: &[Coord<f64>]) -> f64 {
    let n = pts.len();
    if n < 3 { return 0.0 }
    let mut a = 0.0;
    for i in 0..n {
        let (p, q) = (pts[i], pts[(i + 1) % n]);
        a += p.x * q.y - q.x * p.y;
    }
    a / 2.0
}

/// Winding of a ring, measured with longitude as x and latitude as y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Winding of `ring`, or `None` for a ring with zero area.
pub fn winding(ring: &[LatLng]) -> Option<Winding> {
    let pts: Vec<Coord<f64>> = ring.iter().map(|&p| p.into()).collect();
    let area = signed_area(&pts);
    if area > 0.0 { Some(Winding::CounterClockwise) }
    else if area < 0.0 { Some(Winding::Clockwise) }
    else { None }
}

/// Copy of `ring` reordered to the requested winding. Zero-area rings are returned as-is.
pub fn orient(ring: &[LatLng], target: Winding) -> Vec<LatLng> {
    let mut out = ring.to_vec();
    if winding(ring).is_some_and(|w| w != target) {
        out.reverse();
    }
    out
}

/// Area-weighted centroid of the ring. Degenerate rings fall back to the
/// centroid of their vertices; an empty ring has none.
pub fn centroid(ring: &[LatLng]) -> Option<LatLng> {
    let valid = validate_coordinates(ring);
    let line = LineString(close_ring(&valid).into_iter().map(Coord::from).collect());
    Polygon::new(line, vec![]).centroid().map(|p| LatLng::new(p.y(), p.x()))
}

/// Round an area to two decimals for display.
#[inline]
pub fn round_area(area_km2: f64) -> f64 {
    (area_km2 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn square() -> Vec<LatLng> {
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0), LatLng::new(1.0, 0.0)]
    }

    #[test]
    fn validate_drops_nan_entries() {
        let ring = vec![LatLng::new(1.0, 1.0), LatLng::new(f64::NAN, 2.0), LatLng::new(3.0, 3.0)];
        assert_eq!(validate_coordinates(&ring), vec![LatLng::new(1.0, 1.0), LatLng::new(3.0, 3.0)]);
    }

    #[test]
    fn json_decode_skips_malformed_pairs() {
        let value = json!([[1.0, 2.0], [3.0], "x", [4.0, "5"], [6, 7], [8.0, 9.0, 10.0]]);
        assert_eq!(coordinates_from_json(&value), vec![LatLng::new(1.0, 2.0), LatLng::new(6.0, 7.0)]);
        assert!(coordinates_from_json(&json!({"not": "an array"})).is_empty());
    }

    #[test]
    fn close_ring_appends_first_once() {
        let closed = close_ring(&square());
        assert_eq!(closed.len(), 5);
        assert_eq!(closed.first(), closed.last());
        assert_eq!(close_ring(&closed), closed);
        assert!(close_ring(&[]).is_empty());
    }

    #[test]
    fn open_ring_strips_closing_point() {
        assert_eq!(open_ring(&close_ring(&square())), square().as_slice());
        assert_eq!(open_ring(&square()), square().as_slice());
    }

    #[test]
    fn orientation_is_normalized() {
        // (lat, lng) square listed with lng as x: 0,0 -> 1,0 -> 1,1 -> 0,1 is counter-clockwise
        let ccw = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0), LatLng::new(1.0, 0.0)];
        assert_eq!(winding(&ccw), Some(Winding::CounterClockwise));

        let cw = orient(&ccw, Winding::Clockwise);
        assert_eq!(winding(&cw), Some(Winding::Clockwise));
        assert_eq!(orient(&cw, Winding::Clockwise), cw);
    }

    #[test]
    fn degenerate_ring_has_no_winding() {
        let line = vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)];
        assert_eq!(winding(&line), None);
        assert_eq!(orient(&line, Winding::Clockwise), line);
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&square()).unwrap();
        assert!((c.lat - 0.5).abs() < 1e-12);
        assert!((c.lng - 0.5).abs() < 1e-12);
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_area(12.3456), 12.35);
        assert_eq!(round_area(0.004), 0.0);
    }
}
