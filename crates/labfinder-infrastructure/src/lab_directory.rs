//! In-memory lab directory.
//!
//! There is no lab search backend. Every query answers with the same fixture
//! list after an artificial delay, the way a slow network call would.

use std::time::Duration;

use async_trait::async_trait;
use labfinder_core::error::Result;
use labfinder_core::search::{Lab, LabDirectory};

/// Serves a fixed set of labs for any test and location.
#[derive(Debug, Clone)]
pub struct FixtureLabDirectory {
    latency: Duration,
}

impl FixtureLabDirectory {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for FixtureLabDirectory {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl LabDirectory for FixtureLabDirectory {
    async fn find_labs(&self, test: &str, location: &str) -> Result<Vec<Lab>> {
        tracing::debug!(test, location, latency_ms = self.latency.as_millis() as u64, "Looking up labs");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(fixture_labs())
    }
}

#[allow(clippy::too_many_arguments)]
fn lab(
    id: &str,
    name: &str,
    address: &str,
    distance: f64,
    rating: f64,
    review_count: u32,
    test_price: f64,
    opening_hours: &str,
    phone: &str,
    accreditations: &[&str],
    services: &[&str],
) -> Lab {
    Lab {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        distance,
        rating,
        review_count,
        test_price,
        opening_hours: opening_hours.to_string(),
        phone: phone.to_string(),
        logo_url: None,
        accreditations: accreditations.iter().map(|s| s.to_string()).collect(),
        services: services.iter().map(|s| s.to_string()).collect(),
    }
}

fn fixture_labs() -> Vec<Lab> {
    vec![
        lab(
            "lab-1",
            "City Diagnostics Center",
            "123 Main Street, Downtown",
            2.3,
            4.7,
            253,
            45.0,
            "Mon-Sat 7:00 AM - 8:00 PM",
            "(555) 234-5678",
            &["NABL", "CAP"],
            &["Home Collection", "Online Reports"],
        ),
        lab(
            "lab-2",
            "HealthFirst Laboratories",
            "456 Oak Avenue, Midtown",
            4.8,
            4.5,
            189,
            38.0,
            "Mon-Fri 6:30 AM - 6:00 PM",
            "(555) 345-6789",
            &["NABL"],
            &["Online Reports"],
        ),
        lab(
            "lab-3",
            "Precision Pathology",
            "789 Pine Road, Westside",
            7.1,
            4.2,
            97,
            62.0,
            "Mon-Sun 8:00 AM - 9:00 PM",
            "(555) 456-7890",
            &["ISO 15189"],
            &["Home Collection"],
        ),
        lab(
            "lab-4",
            "Wellness Lab Services",
            "321 Elm Street, Northgate",
            9.6,
            3.9,
            64,
            29.0,
            "Mon-Fri 8:00 AM - 5:00 PM",
            "(555) 567-8901",
            &[],
            &["Walk-ins Welcome"],
        ),
        lab(
            "lab-5",
            "Metro Clinical Labs",
            "654 Cedar Lane, Eastbrook",
            14.2,
            4.8,
            412,
            55.0,
            "24 Hours",
            "(555) 678-9012",
            &["NABL", "CAP", "ISO 15189"],
            &["Home Collection", "Online Reports", "Express Results"],
        ),
        lab(
            "lab-6",
            "Valley Medical Testing",
            "987 Birch Boulevard, Southfield",
            18.5,
            4.0,
            78,
            34.0,
            "Mon-Sat 7:30 AM - 4:30 PM",
            "(555) 789-0123",
            &["CAP"],
            &[],
        ),
        lab(
            "lab-7",
            "Regional Reference Laboratory",
            "1500 Harbor Drive, Bayview",
            23.7,
            4.6,
            301,
            41.0,
            "Mon-Fri 7:00 AM - 7:00 PM",
            "(555) 890-1234",
            &["NABL", "ISO 15189"],
            &["Online Reports", "Corporate Packages"],
        ),
    ]
}
