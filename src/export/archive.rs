use std::io::{Cursor, Write};

use geo::Coord;
use shapefile as shp;
use shp::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportError;
use crate::geom::validate_coordinates;
use crate::proj::{reproject_ring, Crs};
use crate::region::Region;

/// Directory inside the archive holding the shapefile parts.
pub const ARCHIVE_FOLDER: &str = "regions_folder";

/// File stem shared by the `.shp`, `.shx`, `.dbf` and `.prj` entries.
pub const ARCHIVE_STEM: &str = "region_polygons";

/// Build a deflate-compressed zip holding the region as a single-record
/// polygon shapefile in `crs`.
///
/// The ring is reprojected from WGS 84, closed and wound clockwise. The
/// attribute table has `name` and `id` fields; the `.prj` is the WKT of `crs`.
pub fn shapefile_zip(region: &Region, crs: &Crs) -> Result<Vec<u8>, ExportError> {
    let ring = validate_coordinates(region.coordinates());
    if ring.len() < 3 { return Err(ExportError::TooFewPoints(ring.len())) }

    let projected = reproject_ring(&ring, &Crs::wgs84(), crs)?;
    let prj = crs.wkt()?.into_bytes();
    let (shp_bytes, shx_bytes, dbf_bytes) = write_shapefile(&projected, region.name())?;
    debug!(
        region = region.name(),
        crs = %crs,
        shp = shp_bytes.len(),
        shx = shx_bytes.len(),
        dbf = dbf_bytes.len(),
        "wrote shapefile parts"
    );

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.add_directory(format!("{ARCHIVE_FOLDER}/"), options)?;
    for (ext, bytes) in [("shp", &shp_bytes), ("shx", &shx_bytes), ("dbf", &dbf_bytes), ("prj", &prj)] {
        zip.start_file(format!("{ARCHIVE_FOLDER}/{ARCHIVE_STEM}.{ext}"), options)?;
        zip.write_all(bytes)?;
    }
    let bytes = zip.finish()?.into_inner();

    info!(region = region.name(), crs = %crs, bytes = bytes.len(), "exported shapefile archive");
    Ok(bytes)
}

/// Write `.shp`, `.shx` and `.dbf` contents for one polygon record.
fn write_shapefile(ring: &[Coord<f64>], name: &str) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), ExportError> {
    let field = |name: &str| FieldName::try_from(name)
        .map_err(|e| ExportError::Shapefile(format!("invalid field name '{name}': {e:?}")));

    let polygon = shp::Polygon::with_rings(vec![
        shp::PolygonRing::Outer(ring.iter().map(|c| shp::Point { x: c.x, y: c.y }).collect()),
    ]);

    let mut record = Record::default();
    record.insert("name".to_string(), FieldValue::Character(Some(name.to_string())));
    record.insert("id".to_string(), FieldValue::Numeric(Some(1.0)));

    let mut shp_out = Cursor::new(Vec::new());
    let mut shx_out = Cursor::new(Vec::new());
    let mut dbf_out = Cursor::new(Vec::new());
    {
        // Headers are finalized when the writers drop at the end of this scope.
        let table = TableWriterBuilder::new()
            .add_character_field(field("name")?, 254)
            .add_numeric_field(field("id")?, 10, 0)
            .build_with_dest(&mut dbf_out);
        let shapes = shp::ShapeWriter::with_shx(&mut shp_out, &mut shx_out);
        let mut writer = shp::Writer::new(shapes, table);
        writer.write_shape_and_record(&polygon, &record)
            .map_err(|e| ExportError::Shapefile(e.to_string()))?;
    }

    Ok((shp_out.into_inner(), shx_out.into_inner(), dbf_out.into_inner()))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;
    use zip::ZipArchive;

    use super::*;
    use crate::geom::LatLng;

    fn toronto() -> Region {
        Region::new("Test Field", vec![
            LatLng::new(43.65, -79.40),
            LatLng::new(43.66, -79.40),
            LatLng::new(43.66, -79.38),
            LatLng::new(43.65, -79.38),
        ], "#4A6FA5")
    }

    fn entries(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn archive_contains_all_parts() {
        let crs = Crs::from_epsg(32617).unwrap();
        let mut archive = entries(shapefile_zip(&toronto(), &crs).unwrap());
        let mut names: Vec<String> = archive.file_names()
            .filter(|n| !n.ends_with('/'))
            .map(String::from)
            .collect();
        names.sort();
        assert_eq!(names, vec![
            "regions_folder/region_polygons.dbf",
            "regions_folder/region_polygons.prj",
            "regions_folder/region_polygons.shp",
            "regions_folder/region_polygons.shx",
        ]);

        let mut prj = String::new();
        archive.by_name("regions_folder/region_polygons.prj").unwrap().read_to_string(&mut prj).unwrap();
        assert!(prj.contains("UTM zone 17N"));
    }

    #[test]
    fn shp_holds_projected_clockwise_ring() {
        let crs = Crs::from_epsg(32617).unwrap();
        let mut archive = entries(shapefile_zip(&toronto(), &crs).unwrap());
        let mut shp_bytes = Vec::new();
        archive.by_name("regions_folder/region_polygons.shp").unwrap().read_to_end(&mut shp_bytes).unwrap();

        let shapes = shp::ShapeReader::new(Cursor::new(shp_bytes)).unwrap().read().unwrap();
        assert_eq!(shapes.len(), 1);
        let shp::Shape::Polygon(polygon) = &shapes[0] else { panic!("expected polygon") };
        let points = polygon.rings()[0].points();
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), points.last());
        assert!(points.iter().all(|p| (500_000.0..700_000.0).contains(&p.x)));
        assert!(points.iter().all(|p| (4_800_000.0..4_900_000.0).contains(&p.y)));

        let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
        assert!(crate::geom::signed_area(&coords) < 0.0);
    }

    #[test]
    fn too_few_points_is_rejected() {
        let region = Region::new("Line", vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)], "#000000");
        let crs = Crs::from_epsg(32617).unwrap();
        assert!(matches!(shapefile_zip(&region, &crs), Err(ExportError::TooFewPoints(2))));
    }
}
