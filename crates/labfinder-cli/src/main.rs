use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use labfinder_application::bootstrap::{build_app, load_config};
use labfinder_core::search::{DistanceFilter, SortOption};
use labfinder_infrastructure::LabFinderPaths;

mod commands;
mod logging;
mod render;
mod shell;

#[derive(Parser)]
#[command(name = "labfinder")]
#[command(about = "LabFinder - find accredited medical labs near you", long_about = None)]
struct Cli {
    /// Directory for config, stored profile and logs (default: ~/.config/labfinder)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Inspect or remove the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Search labs offering a test near a location
    Labs {
        #[arg(long)]
        test: String,
        #[arg(long)]
        location: String,
        /// distance, price-asc, price-desc or rating
        #[arg(long, default_value = "distance")]
        sort: SortOption,
        /// `all` or a maximum distance in km
        #[arg(long, default_value = "all")]
        within: DistanceFilter,
    },
    /// Show where files are stored
    Paths,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,
    /// Remove the stored profile
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = LabFinderPaths::new(cli.data_dir);
    let (config, config_origin) = load_config(&paths);
    let _log_guard = logging::init_tracing(&paths.logs_dir()?, &config.log_level, cli.verbose)?;
    config_origin.log();
    tracing::debug!(root = ?paths.root_dir().ok(), "labfinder starting");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(build_app(&paths, config)?).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&paths)?,
            ProfileAction::Clear => commands::profile::clear(&paths)?,
        },
        Commands::Labs {
            test,
            location,
            sort,
            within,
        } => commands::labs::search(&paths, config, test, location, sort, within).await?,
        Commands::Paths => commands::paths::show(&paths)?,
    }

    Ok(())
}
