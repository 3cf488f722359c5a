use anyhow::Result;
use colored::Colorize;
use labfinder_infrastructure::LabFinderPaths;

/// Prints where labfinder keeps its files.
pub fn show(paths: &LabFinderPaths) -> Result<()> {
    let rows = [
        ("root", paths.root_dir()?),
        ("config", paths.config_file()?),
        ("local storage", paths.local_storage_file()?),
        ("logs", paths.logs_dir()?),
    ];
    for (label, path) in rows {
        println!("{:>14}  {}", label.bright_black(), path.display());
    }
    Ok(())
}
