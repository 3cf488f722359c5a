//! Landing page with the lab search form.

use labfinder_core::notification::Toast;
use labfinder_core::search::SearchIntent;

use super::about::{TESTIMONIALS, TRUST_STATS, Testimonial, TrustStat};
use super::sign_in::SignInDialog;

/// Input of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub test: String,
    pub location: String,
}

impl SearchForm {
    /// Checks both fields are filled in. The first missing field is reported
    /// as a destructive toast.
    pub fn check(&self) -> Result<SearchIntent, Toast> {
        if self.test.trim().is_empty() {
            return Err(Toast::error(
                "Test name required",
                "Please enter the name of the diagnostic test.",
            ));
        }
        if self.location.trim().is_empty() {
            return Err(Toast::error(
                "Location required",
                "Please enter your location or use the detect location feature.",
            ));
        }
        Ok(SearchIntent::new(self.test.clone(), self.location.clone()))
    }
}

/// The `/` page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub brand: String,
    /// First name of the signed-in visitor
    pub greeting: Option<String>,
    pub form: SearchForm,
    pub dialog: Option<SignInDialog>,
    pub trust_stats: &'static [TrustStat],
    pub testimonials: &'static [Testimonial],
}

impl HomeView {
    pub fn new(
        brand: impl Into<String>,
        greeting: Option<String>,
        form: SearchForm,
        dialog: Option<SignInDialog>,
    ) -> Self {
        Self {
            brand: brand.into(),
            greeting,
            form,
            dialog,
            trust_stats: &TRUST_STATS,
            testimonials: &TESTIMONIALS,
        }
    }
}
