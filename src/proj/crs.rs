use std::fmt;

use proj4rs::proj::Proj as Proj4;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::geom::LatLng;

/// A coordinate reference system known to the crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    epsg: Option<u32>,
    definition: String,
    geographic: bool,
}

impl Crs {
    /// WGS 84 longitude/latitude (EPSG:4326).
    pub fn wgs84() -> Self {
        Self {
            epsg: Some(4326),
            definition: "+proj=longlat +datum=WGS84 +no_defs +type=crs".into(),
            geographic: true,
        }
    }

    /// Build from an EPSG code. Supported: 4326, 4269 (NAD83), 3857 (web
    /// mercator), 32601-32660 / 32701-32760 (WGS 84 UTM north/south) and
    /// 26901-26923 (NAD83 UTM north).
    pub fn from_epsg(code: u32) -> Result<Self, ProjectionError> {
        let (definition, geographic) = match code {
            4326 => return Ok(Self::wgs84()),
            4269 => ("+proj=longlat +datum=NAD83 +no_defs +type=crs".to_string(), true),
            3857 => (
                "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs".to_string(),
                false,
            ),
            32601..=32660 => (utm_definition(code - 32600, true, "WGS84"), false),
            32701..=32760 => (utm_definition(code - 32700, false, "WGS84"), false),
            26901..=26923 => (utm_definition(code - 26900, true, "NAD83"), false),
            _ => return Err(ProjectionError::UnsupportedEpsg(code)),
        };
        Ok(Self { epsg: Some(code), definition, geographic })
    }

    /// WGS 84 UTM zone `zone` (1-60) in the given hemisphere.
    pub fn utm(zone: u32, north: bool) -> Result<Self, ProjectionError> {
        let code = if north { 32600 + zone } else { 32700 + zone };
        if !(1..=60).contains(&zone) { return Err(ProjectionError::UnsupportedEpsg(code)) }
        Self::from_epsg(code)
    }

    /// WGS 84 UTM zone containing `center`.
    pub fn utm_for(center: LatLng) -> Result<Self, ProjectionError> {
        let zone = (((center.lng + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u32;
        Self::utm(zone, center.lat >= 0.0)
    }

    /// Build from a raw PROJ.4 string. The string is checked by the projection engine.
    pub fn from_proj_string(definition: &str) -> Result<Self, ProjectionError> {
        let crs = Self {
            epsg: None,
            geographic: definition.contains("+proj=longlat") || definition.contains("+proj=latlong"),
            definition: definition.trim().to_string(),
        };
        crs.proj()?;
        Ok(crs)
    }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    #[inline] pub fn definition(&self) -> &str { &self.definition }

    /// Longitude/latitude in degrees rather than planar metres.
    #[inline] pub fn is_geographic(&self) -> bool { self.geographic }

    /// Projection engine handle.
    pub(crate) fn proj(&self) -> Result<Proj4, ProjectionError> {
        Proj4::from_proj_string(&self.definition)
            .map_err(|e| ProjectionError::InvalidDefinition {
                definition: self.definition.clone(),
                message: e.to_string(),
            })
    }

    /// ESRI-style WKT for a `.prj` file. Available for WGS 84 and its UTM zones.
    pub fn wkt(&self) -> Result<String, ProjectionError> {
        match self.epsg {
            Some(4326) => Ok(WGS84_GEOGCS.to_string()),
            Some(code @ (32601..=32660 | 32701..=32760)) => {
                let north = code < 32700;
                let zone = code - if north { 32600 } else { 32700 };
                let central_meridian = zone as i32 * 6 - 183;
                let false_northing = if north { 0 } else { 10_000_000 };
                Ok(format!(
                    r#"PROJCS["WGS 84 / UTM zone {zone}{hemi}",{WGS84_GEOGCS},PROJECTION["Transverse_Mercator"],PARAMETER["latitude_of_origin",0],PARAMETER["central_meridian",{central_meridian}],PARAMETER["scale_factor",0.9996],PARAMETER["false_easting",500000],PARAMETER["false_northing",{false_northing}],UNIT["metre",1,AUTHORITY["EPSG","9001"]],AUTHORITY["EPSG","{code}"]]"#,
                    hemi = if north { "N" } else { "S" },
                ))
            }
            _ => Err(ProjectionError::NoWkt(self.to_string())),
        }
    }
}

const WGS84_GEOGCS: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4326"]]"#;

fn utm_definition(zone: u32, north: bool, datum: &str) -> String {
    let south = if north { "" } else { " +south" };
    format!("+proj=utm +zone={zone}{south} +datum={datum} +units=m +no_defs +type=crs")
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "EPSG:{code}"),
            None => f.write_str(&self.definition),
        }
    }
}

/// Target CRS for shapefile export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportCrs {
    /// UTM zone containing the region's centroid
    Auto,
    /// A fixed EPSG code
    #[serde(untagged)]
    Epsg { epsg: u32 },
}

impl Default for ExportCrs {
    /// WGS 84 / UTM zone 17N, the zone the analytics backend reads.
    fn default() -> Self { Self::Epsg { epsg: 32617 } }
}

impl ExportCrs {
    /// Resolve to a concrete CRS for a region with the given centroid.
    pub fn resolve(self, centroid: LatLng) -> Result<Crs, ProjectionError> {
        match self {
            Self::Auto => Crs::utm_for(centroid),
            Self::Epsg { epsg } => Crs::from_epsg(epsg),
        }
    }
}
