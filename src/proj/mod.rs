mod crs;
mod reproject;

pub use crs::{Crs, ExportCrs};
pub use reproject::{reproject_ring, unproject_ring};
