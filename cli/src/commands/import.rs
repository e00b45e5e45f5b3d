use anyhow::{bail, Context, Result};
use regionmap::ImportOutcome;

use crate::cli::{Cli, ImportArgs};

pub fn run(cli: &Cli, args: &ImportArgs) -> Result<()> {
    let mut store = super::open_store(cli)?;
    let file_name = args.file.to_string_lossy();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    match store.import(&bytes, &file_name)? {
        ImportOutcome::Session { name, points } => {
            if let Some(name) = &args.name {
                store.session_mut().set_name(name.as_str());
            }
            let gauge = store.session().gauge(store.config().area_limit());
            match store.commit_session() {
                Ok(region) => println!("[import] added '{}' ({points} points, {})", region.name(), gauge.text),
                Err(validation) => bail!("cannot save '{name}': {}", super::describe(&validation)),
            }
        }
        ImportOutcome::Committed { regions, skipped } => {
            for region in &regions {
                println!("[import] added '{}' ({:.2} km²)", region.name(), region.area());
            }
            if skipped > 0 {
                println!("[import] skipped {skipped} shapes with fewer than 3 points");
            }
        }
    }

    Ok(())
}
