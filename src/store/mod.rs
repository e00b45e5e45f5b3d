//! Region collection, selection and persistence.

mod storage;
mod store;

pub use storage::{JsonFileStorage, MemoryStorage, RegionStorage, StorageInfo, STORAGE_VERSION};
pub use store::{ImportOutcome, RegionStore, StoreEvent};
