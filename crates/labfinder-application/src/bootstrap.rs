//! Wires the infrastructure adapters into a [`LabFinderApp`].

use std::sync::Arc;

use anyhow::{Context, Result};
use labfinder_core::config::AppConfig;
use labfinder_core::profile::{ProfileSession, ProfileStore};
use labfinder_core::search::IntentCache;
use labfinder_core::storage::MemoryKeyValueStore;
use labfinder_infrastructure::{
    ConfigOrigin, ConfigService, ConfiguredGeolocation, FileKeyValueStore, FixtureLabDirectory,
    LabFinderPaths,
};

use crate::app::LabFinderApp;

/// Opens the durable profile session under `paths`.
pub fn open_session(paths: &LabFinderPaths) -> Result<ProfileSession> {
    let storage_file = paths
        .local_storage_file()
        .context("Failed to resolve local storage path")?;
    let backend = Arc::new(FileKeyValueStore::new(storage_file));
    Ok(ProfileSession::open(ProfileStore::new(backend)))
}

/// Loads config.toml under `paths`, creating it on first run.
///
/// Log the returned origin once tracing is installed.
pub fn load_config(paths: &LabFinderPaths) -> (AppConfig, ConfigOrigin) {
    ConfigService::new(paths.clone()).load()
}

/// Builds the application with file-backed profile storage, an in-memory
/// pending-search slot, and the fixture lab directory.
pub fn build_app(paths: &LabFinderPaths, config: AppConfig) -> Result<LabFinderApp> {
    let session = open_session(paths)?;
    let latency = config.simulated_latency();

    let app = LabFinderApp::new(
        session,
        IntentCache::new(Arc::new(MemoryKeyValueStore::new())),
        Arc::new(FixtureLabDirectory::new(latency)),
        Arc::new(ConfiguredGeolocation::new(&config.geolocation, latency)),
        config,
    );
    tracing::info!(state = ?app.session().state(), "Application ready");
    Ok(app)
}
