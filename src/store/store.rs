use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::drawing::DrawingSession;
use crate::error::{ImportError, StoreError};
use crate::import::parse_vector_payload;
use crate::region::{NewRegion, Region, Validation};
use crate::store::{RegionStorage, StorageInfo};

/// Change notification delivered to subscribers after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added { index: usize },
    Deleted { index: usize },
    Selected(Option<usize>),
    Loaded { count: usize },
    Cleared,
}

/// Where an imported payload ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// A single shape was loaded into the drawing session for editing.
    Session { name: String, points: usize },
    /// Several shapes were committed as regions; `skipped` failed validation.
    Committed { regions: Vec<Region>, skipped: usize },
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Owns the committed regions, the selection and the drawing session.
///
/// All mutations go through this type. Persistence is best-effort: storage
/// failures are logged and the in-memory state stays authoritative.
pub struct RegionStore {
    regions: Vec<Region>,
    selected: Option<usize>,
    session: DrawingSession,
    storage: Box<dyn RegionStorage>,
    config: Config,
    listeners: Vec<Listener>,
    rng: StdRng,
}

impl RegionStore {
    /// Empty store; call [`RegionStore::load_from_storage`] to restore data.
    pub fn new(storage: Box<dyn RegionStorage>, config: Config) -> Self {
        Self::with_rng(storage, config, StdRng::from_os_rng())
    }

    /// Store with a fixed color RNG.
    pub fn with_rng(storage: Box<dyn RegionStorage>, config: Config, rng: StdRng) -> Self {
        Self {
            regions: Vec::new(),
            selected: None,
            session: DrawingSession::new(config.circle_points()),
            storage,
            config,
            listeners: Vec::new(),
            rng,
        }
    }

    #[inline] pub fn regions(&self) -> &[Region] { &self.regions }

    #[inline] pub fn len(&self) -> usize { self.regions.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    #[inline] pub fn selected_index(&self) -> Option<usize> { self.selected }

    #[inline] pub fn config(&self) -> &Config { &self.config }

    #[inline] pub fn session(&self) -> &DrawingSession { &self.session }

    #[inline] pub fn session_mut(&mut self) -> &mut DrawingSession { &mut self.session }

    pub fn selected_region(&self) -> Option<&Region> { self.selected.and_then(|i| self.regions.get(i)) }

    /// Owned copy of the committed regions, for consumers outside the store.
    pub fn snapshot(&self) -> Vec<Region> { self.regions.clone() }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Append a region built from `new`.
    ///
    /// Fails only on an empty name or fewer than 3 valid coordinates; the
    /// area limit applies to drawn shapes, see [`RegionStore::commit_session`].
    pub fn add_region(&mut self, new: NewRegion) -> Result<Region, Validation> {
        let region = new.into_region(&mut self.rng);
        let validation = Validation::check(region.name(), region.coordinates(), region.area(), None);
        if !validation.is_ok() {
            debug!(name = region.name(), ?validation, "rejected region");
            return Err(validation);
        }
        self.regions.push(region.clone());
        let index = self.regions.len() - 1;
        info!(index, name = region.name(), area_km2 = region.area(), "added region");
        self.persist();
        self.emit(StoreEvent::Added { index });
        Ok(region)
    }

    /// Commit the drawing session's pending shape, enforcing the area limit.
    /// The session is reset on success and left untouched otherwise.
    pub fn commit_session(&mut self) -> Result<Region, Validation> {
        let validation = self.session.validate(self.config.area_limit());
        if !validation.is_ok() {
            debug!(?validation, area_km2 = self.session.area(), "session not committable");
            return Err(validation);
        }
        let new = NewRegion::new(self.session.name(), self.session.coordinates().to_vec())
            .with_area(self.session.area());
        let region = self.add_region(new)?;
        self.session.reset();
        Ok(region)
    }

    /// Set or clear the selection. Out-of-range indices are rejected.
    pub fn select_region(&mut self, index: Option<usize>) -> Result<(), StoreError> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selected = index;
        self.emit(StoreEvent::Selected(index));
        Ok(())
    }

    /// Remove a region, shifting or clearing the selection to match.
    pub fn delete_region(&mut self, index: usize) -> Result<Region, StoreError> {
        self.check_index(index)?;
        let region = self.regions.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        info!(index, name = region.name(), "deleted region");
        self.persist();
        self.emit(StoreEvent::Deleted { index });
        Ok(region)
    }

    /// Replace the collection with stored data and clear the selection.
    /// A storage failure leaves an empty collection.
    pub fn load_from_storage(&mut self) -> usize {
        self.regions = self.storage.load().unwrap_or_else(|e| {
            error!(error = %e, "failed to load stored regions");
            Vec::new()
        });
        self.selected = None;
        let count = self.regions.len();
        info!(count, "loaded regions");
        self.emit(StoreEvent::Loaded { count });
        count
    }

    /// Empty the collection and the stored data.
    pub fn clear_all(&mut self) {
        self.regions.clear();
        self.selected = None;
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear stored regions");
        }
        info!("cleared all regions");
        self.emit(StoreEvent::Cleared);
    }

    /// Summary of persisted data, `None` when storage cannot be read.
    pub fn storage_info(&self) -> Option<StorageInfo> {
        self.storage.info().map_err(|e| warn!(error = %e, "failed to read storage info")).ok()
    }

    /// Import a vector payload.
    ///
    /// One shape goes into the drawing session for editing. Several shapes
    /// are committed directly, skipping any that fail validation. On error
    /// nothing changes.
    pub fn import(&mut self, bytes: &[u8], file_name: &str) -> Result<ImportOutcome, ImportError> {
        let mut shapes = parse_vector_payload(bytes, file_name)?;

        if shapes.len() == 1 {
            let shape = shapes.remove(0);
            let points = shape.coordinates.len();
            self.session.load_imported(shape.name.clone(), shape.coordinates);
            info!(name = %shape.name, points, "imported shape into drawing session");
            return Ok(ImportOutcome::Session { name: shape.name, points });
        }

        let total = shapes.len();
        let regions: Vec<Region> = shapes.into_iter()
            .filter_map(|shape| self.add_region(NewRegion::new(shape.name, shape.coordinates)).ok())
            .collect();
        let skipped = total - regions.len();
        if skipped > 0 {
            warn!(file = file_name, skipped, "imported shapes skipped for too few points");
        }
        Ok(ImportOutcome::Committed { regions, skipped })
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.regions.len() { Ok(()) }
        else { Err(StoreError::IndexOutOfRange { index, len: self.regions.len() }) }
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.regions) {
            warn!(error = %e, count = self.regions.len(), "failed to persist regions");
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for RegionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionStore")
            .field("regions", &self.regions.len())
            .field("selected", &self.selected)
            .field("mode", &self.session.mode())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
