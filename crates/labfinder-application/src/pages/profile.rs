//! Profile creation (`/profile`) and profile edit (`/profile/edit`).

use labfinder_core::user::{ProfileForm, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormMode {
    Create,
    Edit,
}

impl ProfileFormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Join Medical Lab Finder",
            Self::Edit => "Edit Your Profile",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Create => "Create your profile to find and book lab tests near you.",
            Self::Edit => "Update your personal information below.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFormView {
    pub mode: ProfileFormMode,
    /// Prefilled from the current profile when editing
    pub form: ProfileForm,
    pub errors: ValidationErrors,
}
