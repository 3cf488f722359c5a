//! Search domain models.

use serde::{Deserialize, Serialize};

/// A search request captured before the visitor had a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    /// Diagnostic test name, e.g. "Complete Blood Count"
    pub test: String,
    /// Free-form location text or formatted coordinates
    pub location: String,
}

impl SearchIntent {
    pub fn new(test: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            location: location.into(),
        }
    }
}

/// A laboratory offering the searched test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Distance from the searched location in kilometres
    pub distance: f64,
    /// Average rating, 0 to 5
    pub rating: f64,
    pub review_count: u32,
    /// Price of the searched test
    pub test_price: f64,
    pub opening_hours: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub accreditations: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Lab {
    /// Rated 4.5 or higher.
    pub fn is_top_rated(&self) -> bool {
        self.rating >= 4.5
    }

    /// Holds NABL accreditation.
    pub fn is_verified(&self) -> bool {
        self.accreditations.iter().any(|a| a == "NABL")
    }

    /// Test priced under 50.
    pub fn is_best_value(&self) -> bool {
        self.test_price < 50.0
    }
}
