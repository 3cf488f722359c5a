use anyhow::{Context, Result};
use colored::Colorize;
use labfinder_application::bootstrap::open_session;
use labfinder_infrastructure::LabFinderPaths;

/// Prints the stored profile.
pub fn show(paths: &LabFinderPaths) -> Result<()> {
    let session = open_session(paths)?;
    match session.profile() {
        Some(profile) => {
            println!("{:>6}  {}", "name".bright_black(), profile.name);
            println!("{:>6}  {}", "age".bright_black(), profile.age);
            println!("{:>6}  {}", "email".bright_black(), profile.email);
            println!("{:>6}  {}", "phone".bright_black(), profile.phone);
        }
        None => println!("{}", "No profile stored.".yellow()),
    }
    Ok(())
}

/// Removes the stored profile (same as logging out).
pub fn clear(paths: &LabFinderPaths) -> Result<()> {
    let mut session = open_session(paths)?;
    session.logout().context("Failed to remove stored profile")?;
    println!("{}", "Profile removed.".green());
    Ok(())
}
