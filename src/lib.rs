#![doc = "Geographic region drawing, area computation, import and export"]
pub mod config;
pub mod drawing;
pub mod error;
pub mod export;
pub mod geom;
pub mod import;
pub mod proj;
pub mod region;
pub mod store;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use geom::{planar_area, spherical_area, LatLng};

#[doc(inline)]
pub use region::{NewRegion, Region, Validation};

#[doc(inline)]
pub use store::{ImportOutcome, RegionStore, StoreEvent};
