//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from the configuration file (~/.config/labfinder/config.toml).
//!
//! The log level lives in that file, so loading happens before tracing is
//! installed. Loading therefore does not log; it returns a [`ConfigOrigin`]
//! that the caller logs once a subscriber exists.

use crate::paths::LabFinderPaths;
use crate::storage::AtomicTomlFile;
use labfinder_core::LabFinderError;
use labfinder_core::config::AppConfig;
use labfinder_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing config.toml (or the cache)
    File,
    /// config.toml was missing and has been written with the defaults
    Created,
    /// config.toml could not be read or written; defaults are in use
    Defaults(String),
}

impl ConfigOrigin {
    /// Logs how the configuration was obtained.
    pub fn log(&self) {
        match self {
            Self::File => tracing::debug!("Configuration loaded"),
            Self::Created => tracing::info!("Created default configuration"),
            Self::Defaults(error) => tracing::warn!(%error, "Using default configuration"),
        }
    }
}

/// Configuration service that loads and caches the application configuration.
///
/// This implementation reads the configuration from config.toml, writing the
/// defaults there on first use, and caches it to avoid repeated file I/O.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: LabFinderPaths,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new(paths: LabFinderPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        self.load().0
    }

    /// Gets the configuration together with its origin.
    ///
    /// Falls back to the defaults when the file cannot be read or parsed.
    pub fn load(&self) -> (AppConfig, ConfigOrigin) {
        // Check if already cached
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return (cached.clone(), ConfigOrigin::File);
            }
        }

        let (loaded, origin) = self
            .read_or_create()
            .unwrap_or_else(|e| (AppConfig::default(), ConfigOrigin::Defaults(e.to_string())));

        // Cache it
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        (loaded, origin)
    }

    /// Returns the path of config.toml.
    pub fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| LabFinderError::config(e.to_string()))
    }

    /// Loads AppConfig from the config file, creating it if missing.
    fn read_or_create(&self) -> Result<(AppConfig, ConfigOrigin)> {
        let file = AtomicTomlFile::<AppConfig>::new(self.config_path()?);

        match file.load()? {
            Some(config) => Ok((config, ConfigOrigin::File)),
            None => {
                let default_config = AppConfig::default();
                file.save(&default_config)?;
                Ok((default_config, ConfigOrigin::Created))
            }
        }
    }
}
