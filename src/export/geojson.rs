use serde_json::{json, Value};

use crate::geom::{close_ring, LatLng};
use crate::region::Region;

/// GeoJSON Polygon geometry for a ring, as `[lng, lat]` pairs and closed.
pub fn ring_to_geojson(ring: &[LatLng]) -> Value {
    let exterior: Vec<[f64; 2]> = close_ring(ring).iter().map(|c| c.to_lng_lat()).collect();
    json!({
        "type": "Polygon",
        "coordinates": [exterior],
    })
}

/// Single-feature FeatureCollection for a region.
pub fn region_to_geojson(region: &Region) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": ring_to_geojson(region.coordinates()),
            "properties": {
                "name": region.name(),
                "color": region.color(),
                "area_km2": region.area(),
            }
        }]
    })
}
