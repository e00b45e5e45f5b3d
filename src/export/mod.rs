//! Export formats for a committed region.

mod archive;
mod geojson;

pub use archive::{shapefile_zip, ARCHIVE_FOLDER, ARCHIVE_STEM};
pub use geojson::{region_to_geojson, ring_to_geojson};
