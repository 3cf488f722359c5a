//! Location detection port.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A detected position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Formats as the location text placed in the search form, e.g.
/// `"42.3601, -71.0589"`. No reverse geocoding happens.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Provides the device position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// False when the platform cannot detect a position at all.
    fn is_supported(&self) -> bool;

    /// Detects the current position.
    async fn current_position(&self) -> Result<Coordinates>;
}
