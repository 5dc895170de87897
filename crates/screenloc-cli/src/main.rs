use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use screenloc::{Address, DEFAULT_PROCESS_NAME, ResolverConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "screenloc")]
#[command(about = "Resolve the game's location name for a cell")]
struct Args {
    /// Resolver configuration file (JSON)
    #[arg(short, long, default_value = "screenloc.json", global = true)]
    config: PathBuf,

    /// Process ID to attach to (overrides --process)
    #[arg(long, global = true)]
    pid: Option<u32>,

    /// Executable name of the game process
    #[arg(long, default_value = DEFAULT_PROCESS_NAME, env = "SCREENLOC_PROCESS", global = true)]
    process: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the location name for the cell at ADDRESS
    Resolve {
        /// Address of the cell record (hex)
        #[arg(long)]
        cell: Address,
    },
    /// List every map entry of the cell's regions in resolution order
    Regions {
        /// Address of the cell record (hex)
        #[arg(long)]
        cell: Address,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("screenloc={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args.config);
    let target = commands::Target {
        pid: args.pid,
        process: args.process,
    };

    match args.command {
        Command::Resolve { cell } => commands::resolve::run(&target, cell, config),
        Command::Regions { cell } => commands::regions::run(&target, cell, config),
    }
}

fn load_config(path: &Path) -> ResolverConfig {
    match ResolverConfig::load_from_path(path) {
        Ok(config) => {
            info!("Loaded config from {:?}", path);
            config
        }
        Err(e) if e.is_not_found() => ResolverConfig::default(),
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            ResolverConfig::default()
        }
    }
}
