use std::path::PathBuf;

/// Region store command line
#[derive(clap::Parser, Debug)]
#[command(name = "regionmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON config file (area limit, export CRS, storage path)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Region store file, overrides the config, defaults to "./regions.json"
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print planar and spherical area of a ring or shapefile payload
    Area(AreaArgs),

    /// Import a shapefile payload into the store
    Import(ImportArgs),

    /// List stored regions
    List,

    /// Delete a stored region by index
    Delete(DeleteArgs),

    /// Export a stored region as GeoJSON or a zipped shapefile
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct AreaArgs {
    /// JSON array of [lat, lng] pairs, a .zip archive or a .shp file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// .zip archive or .shp file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Name for a single imported shape, defaults to the file name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Region index as shown by `list`
    pub index: usize,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Geojson,
    Shapefile,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Region index as shown by `list`
    pub index: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Geojson)]
    pub format: ExportFormat,

    /// Output file, defaults to "./<region name>.geojson" or ".zip"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
