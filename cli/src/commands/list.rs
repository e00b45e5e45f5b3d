use anyhow::Result;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let store = super::open_store(cli)?;
    if store.is_empty() {
        println!("no regions stored");
        return Ok(());
    }

    for (i, region) in store.regions().iter().enumerate() {
        println!(
            "{i:>3}  {:<32} {:>10.2} km²  {}  {} points",
            region.name(),
            region.area(),
            region.color(),
            region.coordinates().len(),
        );
    }
    if let Some(updated) = store.storage_info().and_then(|info| info.last_updated) {
        println!("last updated {}", updated.to_rfc3339());
    }

    Ok(())
}
