//! Geolocation backed by configuration.

use std::time::Duration;

use async_trait::async_trait;
use labfinder_core::LabFinderError;
use labfinder_core::config::GeolocationSettings;
use labfinder_core::error::Result;
use labfinder_core::location::{Coordinates, GeolocationProvider};

/// Reports the position set in `[geolocation]` of config.toml.
///
/// With `enabled = false` the provider reports itself as unsupported.
#[derive(Debug, Clone)]
pub struct ConfiguredGeolocation {
    position: Option<Coordinates>,
    latency: Duration,
}

impl ConfiguredGeolocation {
    pub fn new(settings: &GeolocationSettings, latency: Duration) -> Self {
        Self {
            position: settings.coordinates(),
            latency,
        }
    }
}

#[async_trait]
impl GeolocationProvider for ConfiguredGeolocation {
    fn is_supported(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.position
            .ok_or_else(|| LabFinderError::geolocation("Location detection is disabled"))
    }
}
