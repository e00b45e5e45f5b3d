use std::fmt;

/// Geometry kinds the import pipeline understands, parsed out of the raw
/// payload before anything downstream sees it. `P` is the point type:
/// planar `geo::Coord` straight from the file, `LatLng` once resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry<P> {
    Point(P),
    LineString(Vec<P>),
    /// Rings of one polygon, exterior first
    Polygon(Vec<Vec<P>>),
    /// Polygons, each with its rings exterior first
    MultiPolygon(Vec<Vec<Vec<P>>>),
}

/// Name of a geometry kind, for logs and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
        })
    }
}

impl<P: Copy> FeatureGeometry<P> {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::LineString(_) => GeometryKind::LineString,
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Convert every ring with `f`, keeping the structure.
    pub fn try_map<Q, E>(self, mut f: impl FnMut(&[P]) -> Result<Vec<Q>, E>) -> Result<FeatureGeometry<Q>, E> {
        Ok(match self {
            Self::Point(p) => match f(&[p])?.into_iter().next() {
                Some(q) => FeatureGeometry::Point(q),
                None => FeatureGeometry::LineString(Vec::new()),
            },
            Self::LineString(line) => FeatureGeometry::LineString(f(&line)?),
            Self::Polygon(rings) => FeatureGeometry::Polygon(
                rings.iter().map(|ring| f(ring)).collect::<Result<_, _>>()?,
            ),
            Self::MultiPolygon(polygons) => FeatureGeometry::MultiPolygon(
                polygons.iter()
                    .map(|rings| rings.iter().map(|ring| f(ring)).collect::<Result<_, _>>())
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// One ring per shape this geometry becomes. Polygons keep only their
    /// exterior; a multi-polygon splits into one ring per member; a point is a
    /// single-position ring. Empty rings are dropped.
    pub fn into_rings(self) -> Vec<Vec<P>> {
        let rings = match self {
            Self::Point(p) => vec![vec![p]],
            Self::LineString(line) => vec![line],
            Self::Polygon(rings) => rings.into_iter().take(1).collect(),
            Self::MultiPolygon(polygons) => polygons.into_iter()
                .filter_map(|rings| rings.into_iter().next())
                .collect(),
        };
        rings.into_iter().filter(|ring| !ring.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ring(offset: i32) -> Vec<(i32, i32)> {
        vec![(offset, 0), (offset + 1, 0), (offset + 1, 1), (offset, 0)]
    }

    #[test]
    fn polygon_keeps_exterior_only() {
        let geometry = FeatureGeometry::Polygon(vec![ring(0), ring(10)]);
        assert_eq!(geometry.into_rings(), vec![ring(0)]);
    }

    #[test]
    fn multipolygon_splits_per_member() {
        let geometry = FeatureGeometry::MultiPolygon(vec![vec![ring(0), ring(5)], vec![ring(10)], vec![ring(20)]]);
        assert_eq!(geometry.kind(), GeometryKind::MultiPolygon);
        assert_eq!(geometry.into_rings(), vec![ring(0), ring(10), ring(20)]);
    }

    #[test]
    fn point_and_line_keep_their_vertices() {
        assert_eq!(FeatureGeometry::Point((3, 4)).into_rings(), vec![vec![(3, 4)]]);
        assert_eq!(FeatureGeometry::LineString(vec![(0, 0), (1, 1)]).into_rings(), vec![vec![(0, 0), (1, 1)]]);
        assert!(FeatureGeometry::<(i32, i32)>::LineString(vec![]).into_rings().is_empty());
    }

    #[test]
    fn try_map_preserves_structure() {
        let geometry = FeatureGeometry::MultiPolygon(vec![vec![ring(0)], vec![ring(1)]]);
        let mapped: FeatureGeometry<i32> = geometry
            .try_map(|r| Ok::<_, ()>(r.iter().map(|(x, y)| x + y).collect()))
            .unwrap();
        assert_eq!(mapped, FeatureGeometry::MultiPolygon(vec![vec![vec![0, 1, 2, 0]], vec![vec![1, 2, 3, 1]]]));
    }
}
