//! Lab directory trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::search::Lab;

/// Source of labs offering a test near a location.
#[async_trait]
pub trait LabDirectory: Send + Sync {
    /// Finds labs for `test` near `location`.
    ///
    /// # Arguments
    /// * `test` - Diagnostic test name as typed by the user
    /// * `location` - Location text or formatted coordinates
    async fn find_labs(&self, test: &str, location: &str) -> Result<Vec<Lab>>;
}
