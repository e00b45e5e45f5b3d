use anyhow::Result;

use crate::cli::{Cli, DeleteArgs};

pub fn run(cli: &Cli, args: &DeleteArgs) -> Result<()> {
    let mut store = super::open_store(cli)?;
    let region = store.delete_region(args.index)?;
    println!("[delete] removed '{}'", region.name());
    Ok(())
}
