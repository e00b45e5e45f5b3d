use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geom::{centroid, planar_area, round_area, validate_coordinates, LatLng};
use crate::region::{random_color, Validation};

/// A named, colored polygon ring with a derived area.
///
/// `area` always matches `coordinates`: it is computed on construction and
/// on every [`Region::set_coordinates`], never set directly. A stored `area`
/// is read but recomputed on deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRegion")]
pub struct Region {
    name: String,
    area: f64,
    color: String,
    coordinates: Vec<LatLng>,
}

impl Region {
    /// Build a region, computing its area from `coordinates`.
    pub fn new(name: impl Into<String>, coordinates: Vec<LatLng>, color: impl Into<String>) -> Self {
        let area = round_area(planar_area(&coordinates));
        Self { name: name.into(), area, color: color.into(), coordinates }
    }

    /// Build a region around an area the caller already computed.
    pub(crate) fn with_area(name: String, coordinates: Vec<LatLng>, color: String, area: f64) -> Self {
        Self { name, area: round_area(area), color, coordinates }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    /// Area in km², rounded to two decimals.
    #[inline] pub fn area(&self) -> f64 { self.area }

    #[inline] pub fn color(&self) -> &str { &self.color }

    /// `(lat, lng)` ring in insertion order, open or closed.
    #[inline] pub fn coordinates(&self) -> &[LatLng] { &self.coordinates }

    /// Replace the whole ring and recompute the area.
    pub fn set_coordinates(&mut self, coordinates: Vec<LatLng>) {
        self.area = round_area(planar_area(&coordinates));
        self.coordinates = coordinates;
    }

    /// Rename; a blank name is rejected and the old one kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), Validation> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() { return Err(Validation { empty_name: true, ..Validation::default() }) }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_color(&mut self, color: impl Into<String>) { self.color = color.into() }

    pub fn centroid(&self) -> Option<LatLng> { centroid(&self.coordinates) }
}

/// Persisted form. `area` must be present but is not trusted.
#[derive(Deserialize)]
struct StoredRegion {
    name: String,
    #[serde(rename = "area")]
    _area: f64,
    color: String,
    coordinates: Vec<LatLng>,
}

impl From<StoredRegion> for Region {
    fn from(stored: StoredRegion) -> Self {
        Region::new(stored.name, stored.coordinates, stored.color)
    }
}

/// A region as submitted by a caller, before color and area are settled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewRegion {
    pub name: String,
    pub coordinates: Vec<LatLng>,
    pub color: Option<String>,
    /// Precomputed area in km². Ignored unless finite and non-negative.
    pub area: Option<f64>,
}

impl NewRegion {
    pub fn new(name: impl Into<String>, coordinates: Vec<LatLng>) -> Self {
        Self { name: name.into(), coordinates, ..Default::default() }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_area(mut self, area_km2: f64) -> Self {
        self.area = Some(area_km2);
        self
    }

    /// Trim the name, drop invalid coordinates, fill in color and area.
    pub(crate) fn into_region<R: Rng + ?Sized>(self, rng: &mut R) -> Region {
        let coordinates = validate_coordinates(&self.coordinates);
        let area = self.area
            .filter(|a| a.is_finite() && *a >= 0.0)
            .unwrap_or_else(|| planar_area(&coordinates));
        let color = self.color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| random_color(rng));
        Region::with_area(self.name.trim().to_string(), coordinates, color, area)
    }
}
