pub mod config_service;
pub mod geolocation;
pub mod lab_directory;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ConfigOrigin, ConfigService};
pub use crate::geolocation::ConfiguredGeolocation;
pub use crate::lab_directory::FixtureLabDirectory;
pub use crate::paths::LabFinderPaths;
pub use crate::storage::FileKeyValueStore;
