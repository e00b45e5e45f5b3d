mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{area, delete, export, import, list};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Area(args) => area::run(&cli, args),
        Commands::Import(args) => import::run(&cli, args),
        Commands::List => list::run(&cli),
        Commands::Delete(args) => delete::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> { run() }
