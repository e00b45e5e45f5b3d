//! Deployment configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::geom::CIRCLE_POINTS;
use crate::proj::ExportCrs;
use crate::region::AreaLimit;

/// Environment variable overriding [`Config::area_limit_km2`].
pub const AREA_LIMIT_ENV: &str = "REGIONMAP_AREA_LIMIT_KM2";

/// Default soft limit on drawn region size, in km².
pub const DEFAULT_AREA_LIMIT_KM2: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest area a drawn region may have when committed.
    pub area_limit_km2: f64,
    /// Vertex count used to approximate drawn circles.
    pub circle_points: usize,
    /// Projection for shapefile export.
    pub export_crs: ExportCrs,
    /// Where the CLI keeps its regions.
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            area_limit_km2: DEFAULT_AREA_LIMIT_KM2,
            circle_points: CIRCLE_POINTS,
            export_crs: ExportCrs::default(),
            storage_path: None,
        }
    }
}

impl Config {
    /// Read a JSON config file; missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(AREA_LIMIT_ENV) {
            self.area_limit_km2 = value.trim().parse()
                .map_err(|_| ConfigError::InvalidValue { key: AREA_LIMIT_ENV, value: value.clone() })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject a non-finite or negative area limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area_limit_km2.is_finite() || self.area_limit_km2 < 0.0 {
            return Err(ConfigError::InvalidValue { key: "area_limit_km2", value: self.area_limit_km2.to_string() });
        }
        Ok(())
    }

    #[inline] pub fn area_limit(&self) -> AreaLimit { AreaLimit(self.area_limit_km2) }

    #[inline] pub fn circle_points(&self) -> usize { self.circle_points.max(3) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.area_limit_km2, 50.0);
        assert_eq!(config.circle_points(), 20);
        assert_eq!(config.export_crs, ExportCrs::Epsg { epsg: 32617 });
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"area_limit_km2": 120, "export_crs": "auto", "circle_points": 1}"#).unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.area_limit_km2, 120.0);
        assert_eq!(config.export_crs, ExportCrs::Auto);
        assert_eq!(config.circle_points(), 3);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn epsg_export_crs() {
        let config: Config = serde_json::from_str(r#"{"export_crs": {"epsg": 32633}}"#).unwrap();
        assert_eq!(config.export_crs, ExportCrs::Epsg { epsg: 32633 });
    }

    #[test]
    fn env_override() {
        let config = Config::default().with_env(|k| (k == AREA_LIMIT_ENV).then(|| " 75.5 ".to_string())).unwrap();
        assert_eq!(config.area_limit_km2, 75.5);
        assert!(Config::default().with_env(|_| Some("lots".into())).is_err());
        assert!(Config::default().with_env(|_| Some("-1".into())).is_err());
        assert_eq!(Config::default().with_env(|_| None).unwrap(), Config::default());
    }

    #[test]
    fn invalid_limit_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"area_limit_km2": -3}"#).unwrap();
        assert!(matches!(Config::from_path(&path), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(Config::from_path(&dir.path().join("missing.json")), Err(ConfigError::Io { .. })));
    }
}
