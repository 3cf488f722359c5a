//! The sign-in / create-account dialog opened from the header or the search
//! form.

use labfinder_core::navigation::Route;
use labfinder_core::user::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogTab {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignInDialog {
    pub tab: DialogTab,
    /// Where to go once the visitor is signed in
    pub redirect: Route,
    /// Field messages from the last rejected submission
    pub errors: ValidationErrors,
}

impl SignInDialog {
    pub fn new(redirect: Route) -> Self {
        Self {
            tab: DialogTab::default(),
            redirect,
            errors: ValidationErrors::default(),
        }
    }

    pub fn switch_to(&mut self, tab: DialogTab) {
        if self.tab != tab {
            self.tab = tab;
            self.errors = ValidationErrors::default();
        }
    }
}
