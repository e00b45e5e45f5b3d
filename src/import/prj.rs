use std::sync::LazyLock;

use regex::Regex;

use crate::error::ProjectionError;
use crate::proj::Crs;

/// Authority closing the outermost PROJCS; nested GEOGCS/UNIT authorities never match.
static PROJCS_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"AUTHORITY\[\s*"EPSG"\s*,\s*"?(\d+)"?\s*\]\s*\]\s*$"#).expect("valid regex")
});

static UTM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)UTM[_ ]zone[_ ](\d{1,2})\s*([NS])").expect("valid regex")
});

/// Resolve the CRS named by a `.prj` WKT string.
///
/// Geographic definitions map to WGS 84 or NAD83. Projected ones are matched
/// by the PROJCS's own EPSG authority or, failing that, by a
/// "UTM zone NN[N|S]" name.
pub(crate) fn crs_from_prj(wkt: &str) -> Result<Crs, ProjectionError> {
    let wkt = wkt.trim();
    let is_nad83 = wkt.contains("NAD83") || wkt.contains("NAD_1983") || wkt.contains("North_American_1983");

    if wkt.starts_with("GEOGCS") {
        return Crs::from_epsg(if is_nad83 { 4269 } else { 4326 });
    }

    if wkt.starts_with("PROJCS") {
        let by_authority = PROJCS_AUTHORITY.captures(wkt)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .and_then(|code| Crs::from_epsg(code).ok())
            .filter(|crs| !crs.is_geographic());
        if let Some(crs) = by_authority { return Ok(crs) }
        if let Some(caps) = UTM_NAME.captures(wkt) {
            let zone: u32 = caps[1].parse().unwrap_or(0);
            let north = caps[2].eq_ignore_ascii_case("N");
            return match (is_nad83, north) {
                (true, true) => Crs::from_epsg(26900 + zone),
                _ => Crs::utm(zone, north),
            };
        }
    }

    Err(ProjectionError::InvalidDefinition {
        definition: wkt.chars().take(80).collect(),
        message: "unrecognized coordinate system".into(),
    })
}
