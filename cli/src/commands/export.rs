use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use regionmap::export::{region_to_geojson, shapefile_zip};

use crate::cli::{Cli, ExportArgs, ExportFormat};

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let mut store = super::open_store(cli)?;
    store.select_region(Some(args.index))?;
    let region = store.selected_region()
        .ok_or_else(|| anyhow!("region {} not found", args.index))?;

    let stem = region.name().replace(|c: char| !c.is_alphanumeric(), "_");
    let (bytes, default_path) = match args.format {
        ExportFormat::Geojson => (
            serde_json::to_vec_pretty(&region_to_geojson(region))?,
            PathBuf::from(format!("{stem}.geojson")),
        ),
        ExportFormat::Shapefile => {
            let centroid = region.centroid()
                .ok_or_else(|| anyhow!("region '{}' has no centroid", region.name()))?;
            let crs = store.config().export_crs.resolve(centroid)?;
            (shapefile_zip(region, &crs)?, PathBuf::from(format!("{stem}.zip")))
        }
    };

    let out_path = args.output.clone().unwrap_or(default_path);
    std::fs::write(&out_path, bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    println!("[export] wrote '{}' to {}", region.name(), out_path.display());
    Ok(())
}
