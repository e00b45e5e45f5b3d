//! Error types for the I/O-adjacent operations of the crate.
//!
//! Geometry functions never fail (they degrade to zero or an empty ring) and
//! save validation is reported as flags, so neither appears here.

use std::path::PathBuf;

use thiserror::Error;

use crate::drawing::DrawingMode;

/// A coordinate reference system could not be built or applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// EPSG code with no known definition
    #[error("unsupported EPSG code: {0}")]
    UnsupportedEpsg(u32),

    /// PROJ.4 definition rejected by the projection engine
    #[error("invalid projection definition '{definition}': {message}")]
    InvalidDefinition { definition: String, message: String },

    /// Input to a forward projection must be geographic
    #[error("source CRS {0} is not geographic")]
    NotGeographic(String),

    /// Input to an inverse projection must be projected
    #[error("source CRS {0} is not projected")]
    NotProjected(String),

    /// A single point failed to transform; the whole ring is rejected
    #[error("failed to transform point {index}: {message}")]
    Transform { index: usize, message: String },

    /// No WKT is known for writing a `.prj` file
    #[error("no WKT definition available for {0}")]
    NoWkt(String),
}

/// A vector payload could not be imported.
#[derive(Error, Debug)]
pub enum ImportError {
    /// File extension is neither `.zip` nor `.shp`
    #[error("unsupported file format '{0}': expected a .zip archive or a .shp file")]
    UnsupportedFormat(String),

    /// Payload parsed but held no usable feature
    #[error("no features found in '{0}'")]
    EmptyPayload(String),

    /// Payload bytes are corrupt or incomplete
    #[error("failed to parse '{name}': {message}")]
    Parse { name: String, message: String },

    /// Payload is in a projected CRS that cannot be inverted
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// A region could not be exported.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("region needs at least 3 valid coordinates to export, found {0}")]
    TooFewPoints(usize),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("failed to write shapefile: {0}")]
    Shapefile(String),

    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Persistence failed. Always logged and swallowed by the store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("malformed stored data: {0}")]
    Format(#[from] serde_json::Error),
}

/// A store operation referenced a region that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("region index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A drawing event arrived in a mode that does not accept it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawingError {
    #[error("cannot {action} while in {mode:?} mode")]
    InvalidTransition { mode: DrawingMode, action: &'static str },

    #[error("no pending shape to {0}")]
    NoPendingShape(&'static str),

    #[error("vertex {index} out of range (shape has {len})")]
    NoSuchVertex { index: usize, len: usize },
}

/// Configuration could not be read or is out of range.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
