//! Unified path management for labfinder files.
//!
//! Every file the application writes lives under one root directory, by
//! default the platform config directory (resolved with the `dirs` crate)
//! plus `labfinder`. A base directory can be supplied instead, which is how
//! the CLI `--data-dir` flag and the tests relocate storage.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Files and directories managed by labfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// `config.toml`
    Config,
    /// `local_storage.json`, the durable key-value slots
    LocalStorage,
    /// `logs/`
    Logs,
}

/// Path resolver for labfinder.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/labfinder/          # Root (or the supplied base directory)
/// ├── config.toml               # Application configuration
/// ├── local_storage.json        # Durable key-value store (user profile)
/// └── logs/                     # Application logs
///     └── labfinder.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone)]
pub struct LabFinderPaths {
    base: Option<PathBuf>,
}

impl LabFinderPaths {
    const APP_DIR: &'static str = "labfinder";

    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the root directory all labfinder files live under.
    pub fn root_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(Self::APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path for a managed file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let root = self.root_dir()?;
        Ok(match service {
            ServiceType::Config => root.join("config.toml"),
            ServiceType::LocalStorage => root.join("local_storage.json"),
            ServiceType::Logs => root.join("logs"),
        })
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        self.get_path(ServiceType::Config)
    }

    pub fn local_storage_file(&self) -> Result<PathBuf, PathError> {
        self.get_path(ServiceType::LocalStorage)
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        self.get_path(ServiceType::Logs)
    }
}

impl Default for LabFinderPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
