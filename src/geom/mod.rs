mod area;
mod circle;
mod coord;
mod ring;

pub use area::{planar_area, spherical_area, EARTH_RADIUS_KM, KM_PER_DEGREE};
pub use circle::{approximate_circle, CIRCLE_POINTS};
pub use coord::LatLng;
pub use ring::{
    centroid, close_ring, coordinates_from_json, is_closed, open_ring, orient, round_area,
    signed_area, validate_coordinates, winding, Winding,
};
