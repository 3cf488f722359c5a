//! Form-boundary validation for profile, sign-in and sign-up input.
//!
//! Raw input is collected into one of the `*Form` structs and validated in
//! one pass so every failing field gets its own message. Only a form that
//! validates produces a [`UserProfile`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::UserProfile;

const NAME_MIN_CHARS: usize = 2;
const AGE_MIN: i64 = 1;
const AGE_MAX: i64 = 120;
const PHONE_MIN_CHARS: usize = 10;
const PASSWORD_MIN_CHARS: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field the message belongs to (`name`, `age`, `email`, ...)
    pub field: String,
    /// Human readable message shown next to the field
    pub message: String,
}

/// Ordered collection of field-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Records a message for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the first message recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Parses an age field the way a numeric input does: surrounding
/// whitespace is ignored, leading digits are read, and anything
/// unparseable counts as "no value".
pub fn parse_age(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.chars().count() < NAME_MIN_CHARS {
        errors.push("name", "Name must be at least 2 characters");
    }
}

fn check_age(errors: &mut ValidationErrors, age: Option<i64>) {
    match age {
        None => errors.push("age", "Age is required"),
        Some(age) if age < AGE_MIN => errors.push("age", "Age must be at least 1"),
        Some(age) if age > AGE_MAX => errors.push("age", "Age must be less than 120"),
        Some(_) => {}
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !is_valid_email(email) {
        errors.push("email", "Please enter a valid email address");
    }
}

fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    if phone.chars().count() < PHONE_MIN_CHARS {
        errors.push("phone", "Phone number must be at least 10 characters");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        errors.push("password", "Password must be at least 6 characters");
    }
}

/// Raw input of the profile creation and profile edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    /// Prefills the form from an existing profile (edit flow).
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            age: Some(i64::from(profile.age)),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }

    /// Validates every field and builds the profile on success.
    pub fn validate(&self) -> Result<UserProfile, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_name(&mut errors, &self.name);
        check_age(&mut errors, self.age);
        check_email(&mut errors, &self.email);
        check_phone(&mut errors, &self.phone);
        errors.into_result(|| self.to_profile())
    }

    // Only called once `check_age` has passed, so the age is in 1..=120.
    fn to_profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            age: self.age.and_then(|a| u32::try_from(a).ok()).unwrap_or_default(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Raw input of the sign-in tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Credentials that passed form validation.
///
/// No identity store exists; the password is checked for shape only and
/// then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    pub email: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInCredentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result(|| SignInCredentials {
            email: self.email.clone(),
        })
    }
}

/// Raw input of the create-account tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub profile: ProfileForm,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<UserProfile, ValidationErrors> {
        let mut errors = match self.profile.validate() {
            Ok(_) => ValidationErrors::default(),
            Err(errors) => errors,
        };
        check_password(&mut errors, &self.password);
        errors.into_result(|| self.profile.to_profile())
    }
}
