//! The `/results` page.

use labfinder_core::search::{DistanceFilter, Lab, LabResults, SortOption};

pub const NO_MATCHES: &str = "No labs found matching your criteria. Try adjusting your filters.";

/// Per-page state: the search being shown and, once loaded, its labs.
#[derive(Debug, Clone)]
pub struct ResultsPage {
    test: String,
    location: String,
    results: Option<LabResults>,
}

impl ResultsPage {
    pub fn new(test: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            location: location.into(),
            results: None,
        }
    }

    pub fn test(&self) -> &str {
        &self.test
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn shows(&self, test: &str, location: &str) -> bool {
        self.test == test && self.location == location
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_none()
    }

    pub fn loaded(&mut self, labs: Vec<Lab>) {
        self.results = Some(LabResults::new(labs));
    }

    pub fn results(&self) -> Option<&LabResults> {
        self.results.as_ref()
    }

    pub fn results_mut(&mut self) -> Option<&mut LabResults> {
        self.results.as_mut()
    }

    pub fn view(&self) -> ResultsView {
        ResultsView {
            test: self.test.clone(),
            location: self.location.clone(),
            sort: self.results.as_ref().map(LabResults::sort).unwrap_or_default(),
            filter: self.results.as_ref().map(LabResults::filter).unwrap_or_default(),
            labs: self.results.as_ref().map(|r| r.visible().to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub test: String,
    pub location: String,
    pub sort: SortOption,
    pub filter: DistanceFilter,
    /// `None` while loading
    pub labs: Option<Vec<Lab>>,
}

impl ResultsView {
    pub fn is_loading(&self) -> bool {
        self.labs.is_none()
    }

    /// The notice shown in place of an empty list.
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.labs {
            Some(labs) if labs.is_empty() => Some(NO_MATCHES),
            _ => None,
        }
    }
}
