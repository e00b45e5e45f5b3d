//! Vector payload import: shapefile archives or bare `.shp` files turned into
//! named `(lat, lng)` rings.

mod geometry;
mod prj;
mod shp;

use std::io::{Cursor, Read};
use std::path::Path;

use geo::Coord;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::ImportError;
use crate::geom::LatLng;
use crate::proj::{unproject_ring, Crs};

pub use geometry::{FeatureGeometry, GeometryKind};

/// Accepted payload formats, decided from the file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `.zip` archive bundling `.shp` (plus optional `.prj`, `.dbf`, ...)
    Archive,
    /// Bare `.shp` geometry file
    Shapefile,
}

impl PayloadFormat {
    /// Classify by extension; anything but `.zip` and `.shp` is rejected
    /// before any parsing.
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let ext = Path::new(file_name).extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("zip") => Ok(Self::Archive),
            Some("shp") => Ok(Self::Shapefile),
            _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// One ring extracted from a payload, named and ready to become a region.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedShape {
    pub name: String,
    pub kind: GeometryKind,
    pub coordinates: Vec<LatLng>,
}

/// Parse a payload into named rings.
///
/// Each Polygon contributes its exterior ring, each MultiPolygon one ring per
/// member, a LineString its vertices and a Point a single position.
/// Unsupported geometry is skipped with a warning. With more than one ring
/// the names are `"<base> #<n>"`, otherwise just `<base>`; the base name is
/// the file stem with `_`, `-` and `.` read as spaces.
pub fn parse_vector_payload(bytes: &[u8], file_name: &str) -> Result<Vec<ImportedShape>, ImportError> {
    let format = PayloadFormat::from_file_name(file_name)?;
    let layers = match format {
        PayloadFormat::Archive => read_archive(bytes, file_name)?,
        PayloadFormat::Shapefile => vec![Layer { shp: bytes.to_vec(), prj: None, name: file_name.to_string() }],
    };

    let mut rings: Vec<(GeometryKind, Vec<LatLng>)> = Vec::new();
    for layer in &layers {
        let crs = layer.prj.as_deref().map(prj::crs_from_prj).transpose()?;
        for shape in shp::read_shapes(&layer.shp, &layer.name)? {
            let Some(geometry) = shp::shape_to_geometry(&shape) else { continue };
            let kind = geometry.kind();
            let geometry = geometry.try_map(|ring| to_lat_lng(ring, crs.as_ref(), &layer.name))?;
            rings.extend(geometry.into_rings().into_iter().map(|ring| (kind, ring)));
        }
    }

    if rings.is_empty() { return Err(ImportError::EmptyPayload(file_name.to_string())) }

    let base = base_name(file_name);
    let count = rings.len();
    info!(file = file_name, shapes = count, "imported vector payload");

    Ok(rings.into_iter().enumerate()
        .map(|(i, (kind, coordinates))| ImportedShape {
            name: if count > 1 { format!("{base} #{}", i + 1) } else { base.clone() },
            kind,
            coordinates,
        })
        .collect())
}

/// Display name derived from a payload's file name.
pub fn base_name(file_name: &str) -> String {
    let stem = Path::new(file_name).file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    stem.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Largest archive entry read into memory. Sizes declared in zip headers are
/// not trusted.
const MAX_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

/// A `.shp` entry and the `.prj` that sits next to it.
struct Layer {
    shp: Vec<u8>,
    prj: Option<String>,
    name: String,
}

fn read_archive(bytes: &[u8], file_name: &str) -> Result<Vec<Layer>, ImportError> {
    let parse_error = |message: String| ImportError::Parse { name: file_name.to_string(), message };

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| parse_error(format!("failed to read zip archive: {e}")))?;

    let mut shps: Vec<(String, Vec<u8>)> = Vec::new();
    let mut prjs: Vec<(String, String)> = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)
            .map_err(|e| parse_error(format!("failed to read archive entry {i}: {e}")))?;
        let entry_name = entry.name().to_string();
        if entry.is_dir() || entry_name.starts_with("__MACOSX/") || entry_name.starts_with("._") || entry_name.contains("/._") { continue }

        let lower = entry_name.to_ascii_lowercase();
        let (stem, is_shp) = match (lower.strip_suffix(".shp"), lower.strip_suffix(".prj")) {
            (Some(stem), _) => (stem.to_string(), true),
            (_, Some(stem)) => (stem.to_string(), false),
            _ => continue,
        };
        let buf = read_limited(&mut entry, MAX_ENTRY_BYTES)
            .map_err(|e| parse_error(format!("failed to read {entry_name}: {e}")))?;
        if is_shp {
            shps.push((stem, buf));
        } else {
            let text = String::from_utf8(buf)
                .map_err(|e| parse_error(format!("{entry_name} is not UTF-8: {e}")))?;
            prjs.push((stem, text));
        }
    }

    if shps.is_empty() { return Err(ImportError::EmptyPayload(file_name.to_string())) }
    debug!(file = file_name, layers = shps.len(), "found shapefile layers in archive");

    Ok(shps.into_iter()
        .map(|(stem, shp)| Layer {
            prj: prjs.iter().find(|(s, _)| *s == stem).map(|(_, text)| text.clone()),
            name: format!("{stem}.shp"),
            shp,
        })
        .collect())
}

/// Read at most `limit` bytes; a longer stream is an error.
fn read_limited(reader: impl Read, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > limit {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, format!("entry exceeds {limit} bytes")));
    }
    Ok(buf)
}

/// Resolve planar file coordinates to `(lat, lng)`.
fn to_lat_lng(ring: &[Coord<f64>], crs: Option<&Crs>, name: &str) -> Result<Vec<LatLng>, ImportError> {
    match crs {
        Some(crs) if !crs.is_geographic() => Ok(unproject_ring(ring, crs, &Crs::wgs84())?),
        Some(_) => Ok(ring.iter().map(|&c| LatLng::from(c)).collect()),
        None => {
            if ring.iter().any(|c| c.x.abs() > 180.0 || c.y.abs() > 90.0) {
                warn!(file = name, "coordinates outside lon/lat range and no .prj supplied");
                return Err(ImportError::Parse {
                    name: name.to_string(),
                    message: "coordinates are not longitude/latitude and no .prj was supplied".into(),
                });
            }
            Ok(ring.iter().map(|&c| LatLng::from(c)).collect())
        }
    }
}
