use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::region::Region;

/// Version tag written into every stored envelope.
pub const STORAGE_VERSION: &str = "1.0";

/// Best-effort persistence for the region list.
pub trait RegionStorage {
    /// Stored regions, malformed entries dropped. Empty when nothing is stored.
    fn load(&self) -> Result<Vec<Region>, StorageError>;

    /// Replace the stored regions.
    fn save(&mut self, regions: &[Region]) -> Result<(), StorageError>;

    /// Remove all stored data.
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Summary of what is stored, without decoding the regions.
    fn info(&self) -> Result<StorageInfo, StorageError>;
}

/// Summary of the stored envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageInfo {
    pub has_data: bool,
    pub count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

/// On-disk layout; regions stay raw so one bad entry cannot poison the rest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    regions: Vec<Value>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

impl Envelope {
    fn new(regions: &[Region]) -> Result<Self, StorageError> {
        Ok(Self {
            version: Some(STORAGE_VERSION.to_string()),
            regions: regions.iter().map(serde_json::to_value).collect::<Result<_, _>>()?,
            last_updated: Some(Utc::now()),
        })
    }

    fn info(&self) -> StorageInfo {
        StorageInfo { has_data: true, count: self.regions.len(), last_updated: self.last_updated }
    }

    /// Decode regions, dropping entries with a missing field or no coordinates.
    fn into_regions(self) -> Vec<Region> {
        if let Some(version) = self.version.as_deref().filter(|v| *v != STORAGE_VERSION) {
            warn!(version, "stored regions use an unknown version");
        }
        let total = self.regions.len();
        let regions: Vec<Region> = self.regions.into_iter()
            .filter_map(|value| match serde_json::from_value::<Region>(value) {
                Ok(region) if !region.coordinates().is_empty() && !region.name().is_empty() => Some(region),
                Ok(_) => None,
                Err(e) => {
                    debug!(error = %e, "skipping malformed stored region");
                    None
                }
            })
            .collect();
        if regions.len() < total {
            warn!(dropped = total - regions.len(), kept = regions.len(), "filtered malformed stored regions");
        }
        regions
    }
}

/// Regions persisted as a JSON envelope in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    #[inline] pub fn path(&self) -> &Path { &self.path }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }

    fn read_envelope(&self) -> Result<Option<Envelope>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl RegionStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Region>, StorageError> {
        Ok(self.read_envelope()?.map(Envelope::into_regions).unwrap_or_default())
    }

    fn save(&mut self, regions: &[Region]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&Envelope::new(regions)?)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), count = regions.len(), "saved regions");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(self.io_error(e)),
            _ => Ok(()),
        }
    }

    fn info(&self) -> Result<StorageInfo, StorageError> {
        Ok(self.read_envelope()?.map(|env| env.info()).unwrap_or_default())
    }
}

/// In-memory storage holding the serialized envelope, for tests and
/// sessions that should not touch disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    stored: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    /// Storage pre-loaded with a raw JSON envelope.
    pub fn from_json(json: impl Into<String>) -> Self { Self { stored: Some(json.into()) } }

    fn envelope(&self) -> Result<Option<Envelope>, StorageError> {
        self.stored.as_deref().map(serde_json::from_str).transpose().map_err(StorageError::from)
    }
}

impl RegionStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Region>, StorageError> {
        Ok(self.envelope()?.map(Envelope::into_regions).unwrap_or_default())
    }

    fn save(&mut self, regions: &[Region]) -> Result<(), StorageError> {
        self.stored = Some(serde_json::to_string(&Envelope::new(regions)?)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.stored = None;
        Ok(())
    }

    fn info(&self) -> Result<StorageInfo, StorageError> {
        Ok(self.envelope()?.map(|env| env.info()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geom::{planar_area, round_area, LatLng};

    fn regions() -> Vec<Region> {
        let ring = vec![LatLng::new(45.0, 7.0), LatLng::new(45.0, 7.1), LatLng::new(45.1, 7.1)];
        vec![
            Region::new("North", ring.clone(), "#FF6B6B"),
            Region::new("South", ring, "#4ECDC4"),
        ]
    }

    #[test]
    fn file_round_trip_and_info() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join("nested/regions.json"));
        assert_eq!(storage.info().unwrap(), StorageInfo::default());
        assert!(storage.load().unwrap().is_empty());

        storage.save(&regions()).unwrap();
        assert_eq!(storage.load().unwrap(), regions());

        let info = storage.info().unwrap();
        assert!(info.has_data);
        assert_eq!(info.count, 2);
        assert!(info.last_updated.is_some());

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_empty());
        storage.clear().unwrap();
    }

    #[test]
    fn envelope_layout() {
        let mut storage = MemoryStorage::new();
        storage.save(&regions()).unwrap();
        let value: Value = serde_json::from_str(storage.stored.as_deref().unwrap()).unwrap();
        assert_eq!(value["version"], STORAGE_VERSION);
        assert_eq!(value["regions"].as_array().map(Vec::len), Some(2));
        assert!(value["lastUpdated"].as_str().is_some());
        assert_eq!(value["regions"][0]["coordinates"][0], serde_json::json!([45.0, 7.0]));
    }

    #[test]
    fn malformed_entries_are_filtered() {
        let storage = MemoryStorage::from_json(r##"{
            "version": "1.0",
            "regions": [
                {"name": "Good", "area": 1.5, "color": "#FF6B6B", "coordinates": [[1, 2], [1, 3], [2, 3]]},
                {"name": "NoArea", "color": "#FF6B6B", "coordinates": [[1, 2], [1, 3], [2, 3]]},
                {"name": "Empty", "area": 0, "color": "#FF6B6B", "coordinates": []},
                {"area": 1, "color": "#FF6B6B", "coordinates": [[1, 2]]},
                42
            ],
            "lastUpdated": "2025-01-01T00:00:00Z"
        }"##);
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), "Good");
        let ring = [LatLng::new(1.0, 2.0), LatLng::new(1.0, 3.0), LatLng::new(2.0, 3.0)];
        assert_eq!(loaded[0].area(), round_area(planar_area(&ring)));
        assert_eq!(storage.info().unwrap().count, 5);
    }

    #[test]
    fn corrupt_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonFileStorage::new(path).load(), Err(StorageError::Format(_))));
    }
}
