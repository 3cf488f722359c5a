use anyhow::{Result, bail};
use colored::Colorize;
use labfinder_application::View;
use labfinder_application::bootstrap::build_app;
use labfinder_core::config::AppConfig;
use labfinder_core::navigation::Route;
use labfinder_core::search::{DistanceFilter, SortOption};
use labfinder_infrastructure::LabFinderPaths;

use crate::render;

/// One-shot search. Needs a stored profile, like the results page does.
pub async fn search(
    paths: &LabFinderPaths,
    config: AppConfig,
    test: String,
    location: String,
    sort: SortOption,
    within: DistanceFilter,
) -> Result<()> {
    let mut app = build_app(paths, config)?;
    app.navigate(Route::results(test, location));

    if !matches!(app.render(), View::Results(_)) {
        bail!("A profile is required to see results. Run `labfinder shell` and create one first.");
    }

    app.load_results().await?;
    app.sort_results(sort);
    app.filter_results(within);

    match app.render() {
        View::Results(view) => render::results(&view),
        _ => println!("{}", "Nothing to show.".yellow()),
    }
    Ok(())
}
