use std::io::Cursor;

use geo::Coord;
use shapefile::{self as shp, PolygonRing, Shape};
use tracing::warn;

use crate::error::ImportError;
use crate::import::FeatureGeometry;

/// Point types whose planar position can be read.
trait PlanarPoint {
    fn coord(&self) -> Coord<f64>;
}

impl PlanarPoint for shp::Point {
    fn coord(&self) -> Coord<f64> { Coord { x: self.x, y: self.y } }
}

impl PlanarPoint for shp::PointM {
    fn coord(&self) -> Coord<f64> { Coord { x: self.x, y: self.y } }
}

impl PlanarPoint for shp::PointZ {
    fn coord(&self) -> Coord<f64> { Coord { x: self.x, y: self.y } }
}

/// Read every shape of a `.shp` file held in memory.
pub(crate) fn read_shapes(bytes: &[u8], name: &str) -> Result<Vec<Shape>, ImportError> {
    let parse_error = |e: shp::Error| ImportError::Parse { name: name.to_string(), message: e.to_string() };

    shp::ShapeReader::new(Cursor::new(bytes))
        .map_err(parse_error)?
        .read()
        .map_err(parse_error)
}

/// Convert a shapefile record into the pipeline's geometry, or `None` (with a
/// warning) for kinds the pipeline does not handle.
pub(crate) fn shape_to_geometry(shape: &Shape) -> Option<FeatureGeometry<Coord<f64>>> {
    let geometry = match shape {
        Shape::Point(p) => FeatureGeometry::Point(p.coord()),
        Shape::PointM(p) => FeatureGeometry::Point(p.coord()),
        Shape::PointZ(p) => FeatureGeometry::Point(p.coord()),
        Shape::Polyline(line) => return polyline(line.parts()),
        Shape::PolylineM(line) => return polyline(line.parts()),
        Shape::PolylineZ(line) => return polyline(line.parts()),
        Shape::Polygon(polygon) => polygon_rings(polygon.rings()),
        Shape::PolygonM(polygon) => polygon_rings(polygon.rings()),
        Shape::PolygonZ(polygon) => polygon_rings(polygon.rings()),
        Shape::NullShape => return None,
        other => {
            warn!(shape_type = ?other.shapetype(), "skipping unsupported geometry type");
            return None;
        }
    };
    Some(geometry)
}

/// Single-part polylines are line strings; multi-part ones are not supported.
fn polyline<P: PlanarPoint>(parts: &[Vec<P>]) -> Option<FeatureGeometry<Coord<f64>>> {
    match parts {
        [part] => Some(FeatureGeometry::LineString(part.iter().map(PlanarPoint::coord).collect())),
        _ => {
            warn!(parts = parts.len(), "skipping unsupported geometry type MultiLineString");
            None
        }
    }
}

/// Group shapefile rings into polygons: each outer ring with the holes that
/// follow it. One group is a Polygon, several a MultiPolygon.
fn polygon_rings<P: PlanarPoint>(rings: &[PolygonRing<P>]) -> FeatureGeometry<Coord<f64>> {
    let mut polygons: Vec<Vec<Vec<Coord<f64>>>> = Vec::new();

    for ring in rings {
        let coords = ring.points().iter().map(PlanarPoint::coord).collect::<Vec<_>>();
        match ring {
            PolygonRing::Outer(_) => polygons.push(vec![coords]),
            PolygonRing::Inner(_) => match polygons.last_mut() {
                Some(polygon) => polygon.push(coords),
                // hole with no exterior before it: treat it as an exterior
                None => polygons.push(vec![coords]),
            },
        }
    }

    if polygons.len() == 1 {
        FeatureGeometry::Polygon(polygons.remove(0))
    } else {
        FeatureGeometry::MultiPolygon(polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::GeometryKind;

    fn pt(x: f64, y: f64) -> shp::Point { shp::Point { x, y } }

    fn square(x: f64) -> Vec<shp::Point> {
        // clockwise, closed: shapefile exterior
        vec![pt(x, 0.0), pt(x, 1.0), pt(x + 1.0, 1.0), pt(x + 1.0, 0.0), pt(x, 0.0)]
    }

    #[test]
    fn single_outer_ring_is_polygon() {
        let polygon = shp::Polygon::with_rings(vec![PolygonRing::Outer(square(0.0))]);
        let geometry = shape_to_geometry(&Shape::Polygon(polygon)).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
    }

    #[test]
    fn several_outer_rings_are_multipolygon() {
        let polygon = shp::Polygon::with_rings(vec![
            PolygonRing::Outer(square(0.0)),
            PolygonRing::Outer(square(5.0)),
            PolygonRing::Outer(square(10.0)),
        ]);
        let geometry = shape_to_geometry(&Shape::Polygon(polygon)).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::MultiPolygon);
        assert_eq!(geometry.into_rings().len(), 3);
    }

    #[test]
    fn points_and_lines() {
        let point = shape_to_geometry(&Shape::Point(pt(1.0, 2.0))).unwrap();
        assert_eq!(point, FeatureGeometry::Point(Coord { x: 1.0, y: 2.0 }));

        let line = shp::Polyline::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)]);
        assert_eq!(shape_to_geometry(&Shape::Polyline(line)).unwrap().kind(), GeometryKind::LineString);
    }

    #[test]
    fn unsupported_kinds_are_skipped() {
        assert!(shape_to_geometry(&Shape::NullShape).is_none());
        let multipoint = shp::Multipoint::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)]);
        assert!(shape_to_geometry(&Shape::Multipoint(multipoint)).is_none());
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(matches!(read_shapes(b"not a shapefile", "x.shp"), Err(ImportError::Parse { .. })));
    }
}
