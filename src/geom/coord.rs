use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Serialized as a `[lat, lng]` pair, the order every ring in this crate uses.
/// Conversion into a `geo::Coord` swaps the axes (`x = lng`, `y = lat`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline] pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Both components are finite numbers.
    #[inline] pub fn is_valid(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }

    /// `[lng, lat]`, the GeoJSON axis order.
    #[inline] pub fn to_lng_lat(self) -> [f64; 2] { [self.lng, self.lat] }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self { Self { lat, lng } }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self { [p.lat, p.lng] }
}

impl From<LatLng> for Coord<f64> {
    fn from(p: LatLng) -> Self { Coord { x: p.lng, y: p.lat } }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self { Self { lat: c.y, lng: c.x } }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lat_lng_pair() {
        let p = LatLng::new(43.65, -79.38);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[43.65,-79.38]");
        let back: LatLng = serde_json::from_str("[43.65,-79.38]").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn coord_conversion_swaps_axes() {
        let c: Coord<f64> = LatLng::new(10.0, 20.0).into();
        assert_eq!((c.x, c.y), (20.0, 10.0));
        assert_eq!(LatLng::from(c), LatLng::new(10.0, 20.0));
    }

    #[test]
    fn nan_and_infinite_components_are_invalid() {
        assert!(LatLng::new(1.0, 2.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 2.0).is_valid());
        assert!(!LatLng::new(1.0, f64::INFINITY).is_valid());
    }
}
