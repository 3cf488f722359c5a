//! User domain module.
//!
//! This module contains the user profile model and the form-boundary
//! validation that guards what may enter a profile session.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model
//! - `form`: Raw form input and validation rules
//!
//! # Usage
//!
//! ```ignore
//! use labfinder_core::user::{ProfileForm, UserProfile};
//! ```

mod form;
mod model;

// Re-export public API
pub use form::{
    FieldError, ProfileForm, SignInCredentials, SignInForm, SignUpForm, ValidationErrors,
    parse_age,
};
pub use model::UserProfile;
