//! UserProfile domain model.
//!
//! Represents the profile a visitor creates (or that sign-in synthesizes)
//! before protected pages become available.

use serde::{Deserialize, Serialize};

/// User profile domain model.
///
/// A `UserProfile` is only ever constructed from validated form input (see
/// [`super::ProfileForm`]) or read back from durable storage. The session
/// never holds a partially filled profile.
///
/// Serialized as a plain JSON object:
/// `{"name":"Jo","age":31,"email":"jo@x.com","phone":"5551234567"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Full name, at least 2 characters
    pub name: String,
    /// Age in years, 1 to 120 inclusive
    pub age: u32,
    /// Contact email address
    pub email: String,
    /// Phone number, at least 10 characters, free-form
    pub phone: String,
}

impl UserProfile {
    /// Name used for the profile synthesized by the sign-in flow.
    pub const PLACEHOLDER_NAME: &'static str = "Demo User";
    /// Age used for the profile synthesized by the sign-in flow.
    pub const PLACEHOLDER_AGE: u32 = 30;
    /// Phone used for the profile synthesized by the sign-in flow.
    pub const PLACEHOLDER_PHONE: &'static str = "(555) 123-4567";

    /// Builds the placeholder profile that sign-in stores in place of a
    /// real account lookup. Only the email comes from the user.
    pub fn placeholder(email: impl Into<String>) -> Self {
        Self {
            name: Self::PLACEHOLDER_NAME.to_string(),
            age: Self::PLACEHOLDER_AGE,
            email: email.into(),
            phone: Self::PLACEHOLDER_PHONE.to_string(),
        }
    }

    /// First word of the name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
