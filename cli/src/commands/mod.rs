pub mod area;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;

use std::path::PathBuf;

use anyhow::{Context, Result};
use regionmap::store::JsonFileStorage;
use regionmap::{Config, RegionStore};

use crate::cli::Cli;

/// Config file (or defaults) with environment overrides applied.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?
            .with_env(|key| std::env::var(key).ok())?,
        None => Config::from_env()?,
    };
    Ok(config)
}

/// Store backed by the configured JSON file, with its regions loaded.
pub(crate) fn open_store(cli: &Cli) -> Result<RegionStore> {
    let config = load_config(cli)?;
    let path = cli.store.clone()
        .or_else(|| config.storage_path.clone())
        .unwrap_or_else(|| PathBuf::from("regions.json"));
    tracing::debug!(path = %path.display(), "opening region store");

    let mut store = RegionStore::new(Box::new(JsonFileStorage::new(path)), config);
    store.load_from_storage();
    Ok(store)
}

/// Human-readable list of failed validation checks.
pub(crate) fn describe(validation: &regionmap::Validation) -> String {
    let mut reasons = Vec::new();
    if validation.empty_name { reasons.push("name is empty") }
    if validation.too_few_points { reasons.push("fewer than 3 valid points") }
    if validation.over_area_limit { reasons.push("area exceeds the configured limit") }
    reasons.join(", ")
}
