use geo::Coord;
use proj4rs::transform::transform;
use tracing::debug;

use crate::error::ProjectionError;
use crate::geom::{signed_area, LatLng};
use crate::proj::Crs;

/// Project a `(lat, lng)` ring from a geographic CRS into a planar one.
///
/// Pointwise and order-preserving; any point that fails to transform fails
/// the whole ring. The output is closed and wound clockwise, the exterior
/// ring convention of the shapefile format.
pub fn reproject_ring(ring: &[LatLng], source: &Crs, target: &Crs) -> Result<Vec<Coord<f64>>, ProjectionError> {
    if !source.is_geographic() { return Err(ProjectionError::NotGeographic(source.to_string())) }

    let from = source.proj()?;
    let to = target.proj()?;

    let mut projected = ring.iter().enumerate()
        .map(|(index, p)| {
            // Geographic in radians, projected out in metres.
            let mut point = (p.lng.to_radians(), p.lat.to_radians(), 0.0);
            transform(&from, &to, &mut point)
                .map_err(|e| ProjectionError::Transform { index, message: e.to_string() })?;
            let (x, y) = if target.is_geographic() { (point.0.to_degrees(), point.1.to_degrees()) }
                         else { (point.0, point.1) };
            if !(x.is_finite() && y.is_finite()) {
                return Err(ProjectionError::Transform { index, message: format!("non-finite result for {p}") });
            }
            Ok(Coord { x, y })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let (Some(&first), Some(&last)) = (projected.first(), projected.last()) {
        if first != last { projected.push(first) }
    }
    if signed_area(&projected) > 0.0 {
        projected.reverse(); // make CW
    }

    debug!(points = projected.len(), %source, %target, "reprojected ring");
    Ok(projected)
}

/// Inverse of [`reproject_ring`]: planar points back to `(lat, lng)`.
/// Order and closure are left exactly as given.
pub fn unproject_ring(points: &[Coord<f64>], source: &Crs, target: &Crs) -> Result<Vec<LatLng>, ProjectionError> {
    if source.is_geographic() { return Err(ProjectionError::NotProjected(source.to_string())) }
    if !target.is_geographic() { return Err(ProjectionError::NotGeographic(target.to_string())) }

    let from = source.proj()?;
    let to = target.proj()?;

    points.iter().enumerate()
        .map(|(index, c)| {
            let mut point = (c.x, c.y, 0.0);
            transform(&from, &to, &mut point)
                .map_err(|e| ProjectionError::Transform { index, message: e.to_string() })?;
            let p = LatLng::new(point.1.to_degrees(), point.0.to_degrees());
            if !p.is_valid() {
                return Err(ProjectionError::Transform { index, message: "non-finite result".into() });
            }
            Ok(p)
        })
        .collect()
}
