use crate::geom::{approximate_circle, LatLng};

/// A shape as reported by the map's drawing tools.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Vertex ring of a drawn polygon
    Polygon(Vec<LatLng>),
    /// Corner ring of a drawn rectangle
    Rectangle(Vec<LatLng>),
    /// Circle with its radius in metres
    Circle { center: LatLng, radius_m: f64 },
}

impl Shape {
    /// Polygon from nested rings; only the first (exterior) ring is kept.
    pub fn from_rings(rings: Vec<Vec<LatLng>>) -> Self {
        Self::Polygon(rings.into_iter().next().unwrap_or_default())
    }

    /// Axis-aligned rectangle from two opposite corners, listed
    /// south-west, north-west, north-east, south-east.
    pub fn rectangle(a: LatLng, b: LatLng) -> Self {
        let (south, north) = (a.lat.min(b.lat), a.lat.max(b.lat));
        let (west, east) = (a.lng.min(b.lng), a.lng.max(b.lng));
        Self::Rectangle(vec![
            LatLng::new(south, west),
            LatLng::new(north, west),
            LatLng::new(north, east),
            LatLng::new(south, east),
        ])
    }

    /// The `(lat, lng)` ring this shape stands for. Circles are approximated
    /// with `circle_points` vertices.
    pub fn extract_coordinates(&self, circle_points: usize) -> Vec<LatLng> {
        match self {
            Self::Polygon(ring) | Self::Rectangle(ring) => ring.clone(),
            Self::Circle { center, radius_m } => approximate_circle(*center, *radius_m, circle_points),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geom::CIRCLE_POINTS;

    #[test]
    fn polygon_keeps_first_ring_only() {
        let outer = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)];
        let hole = vec![LatLng::new(0.2, 0.5), LatLng::new(0.3, 0.6), LatLng::new(0.4, 0.5)];
        let shape = Shape::from_rings(vec![outer.clone(), hole]);
        assert_eq!(shape.extract_coordinates(CIRCLE_POINTS), outer);
        assert_eq!(Shape::from_rings(vec![]).extract_coordinates(CIRCLE_POINTS), vec![]);
    }

    #[test]
    fn rectangle_corners_are_normalized() {
        let shape = Shape::rectangle(LatLng::new(2.0, 5.0), LatLng::new(1.0, 3.0));
        assert_eq!(shape.extract_coordinates(CIRCLE_POINTS), vec![
            LatLng::new(1.0, 3.0),
            LatLng::new(2.0, 3.0),
            LatLng::new(2.0, 5.0),
            LatLng::new(1.0, 5.0),
        ]);
    }

    #[test]
    fn circle_becomes_polygon() {
        let shape = Shape::Circle { center: LatLng::new(10.0, 10.0), radius_m: 500.0 };
        assert_eq!(shape.extract_coordinates(CIRCLE_POINTS).len(), CIRCLE_POINTS);
        assert_eq!(shape.extract_coordinates(36).len(), 36);
    }
}
