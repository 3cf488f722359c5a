//! Page view models.
//!
//! A view is a snapshot of what one page shows, produced by
//! [`crate::LabFinderApp::render`]. Pages that need a complete profile are
//! only ever built after the profile guard allowed them.

pub mod about;
pub mod bookings;
pub mod home;
pub mod profile;
pub mod results;
pub mod sign_in;

pub use about::AboutView;
pub use bookings::BookingsView;
pub use home::{HomeView, SearchForm};
pub use profile::{ProfileFormMode, ProfileFormView};
pub use results::{ResultsPage, ResultsView};
pub use sign_in::{DialogTab, SignInDialog};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing is rendered: a guard suppressed the page, or the results page
    /// has nothing to show.
    Blank,
    Home(HomeView),
    About(AboutView),
    Profile(ProfileFormView),
    Results(ResultsView),
    Bookings(BookingsView),
}

impl View {
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}
