//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! field has a default so a partial file still loads.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Product name shown in page headers and toasts
    pub brand_name: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Artificial delay for form submissions and lab loading
    pub simulated_latency_ms: u64,
    pub geolocation: GeolocationSettings,
}

impl AppConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            brand_name: "EazyPath".to_string(),
            log_level: "info".to_string(),
            simulated_latency_ms: 1000,
            geolocation: GeolocationSettings::default(),
        }
    }
}

/// Position reported by location detection. There is no device GPS on a
/// terminal, so the position comes from configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeolocationSettings {
    pub enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeolocationSettings {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.enabled
            .then(|| Coordinates::new(self.latitude, self.longitude))
    }
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: 42.3601,
            longitude: -71.0589,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("simulated_latency_ms = 0").unwrap();
        assert_eq!(config.simulated_latency(), Duration::ZERO);
        assert_eq!(config.brand_name, "EazyPath");
        assert!(config.geolocation.enabled);
    }

    #[test]
    fn test_disabled_geolocation_has_no_coordinates() {
        let config: AppConfig = toml::from_str(
            r#"
            [geolocation]
            enabled = false
            "#,
        )
        .unwrap();
        assert!(config.geolocation.coordinates().is_none());
    }
}
