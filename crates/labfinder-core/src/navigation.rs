//! Routes and the navigation surface.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LabFinderError;

/// A page destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Route {
    /// Landing page with the search form (`/`)
    #[default]
    Home,
    /// Static about page with testimonials (`/about`)
    About,
    /// Profile creation (`/profile`). Never gated.
    Profile,
    /// Profile edit (`/profile/edit`)
    ProfileEdit,
    /// The visitor's bookings (`/bookings`)
    Bookings,
    /// Lab results (`/results?test=..&location=..`)
    Results {
        test: Option<String>,
        location: Option<String>,
    },
}

impl Route {
    /// Results route carrying both query values.
    pub fn results(test: impl Into<String>, location: impl Into<String>) -> Self {
        Self::Results {
            test: Some(test.into()),
            location: Some(location.into()),
        }
    }

    /// Results route with no query values.
    pub fn bare_results() -> Self {
        Self::Results {
            test: None,
            location: None,
        }
    }

    /// Pages that only render for a complete profile.
    pub fn requires_profile(&self) -> bool {
        matches!(
            self,
            Self::ProfileEdit | Self::Bookings | Self::Results { .. }
        )
    }

    /// Path form of the route, query values form-urlencoded.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::ProfileEdit => "/profile/edit".to_string(),
            Self::Bookings => "/bookings".to_string(),
            Self::Results { test, location } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(test) = test {
                    query.append_pair("test", test);
                }
                if let Some(location) = location {
                    query.append_pair("location", location);
                }
                let query = query.finish();
                if query.is_empty() {
                    "/results".to_string()
                } else {
                    format!("/results?{}", query)
                }
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = LabFinderError;

    /// Parses a path. Empty query values count as absent.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        let base = match base.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match base {
            "/" => Ok(Self::Home),
            "/about" => Ok(Self::About),
            "/profile" => Ok(Self::Profile),
            "/profile/edit" => Ok(Self::ProfileEdit),
            "/bookings" => Ok(Self::Bookings),
            "/results" => {
                let mut test = None;
                let mut location = None;
                for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
                    if value.is_empty() {
                        continue;
                    }
                    match key.as_ref() {
                        "test" => test = Some(value.into_owned()),
                        "location" => location = Some(value.into_owned()),
                        _ => {}
                    }
                }
                Ok(Self::Results { test, location })
            }
            other => Err(LabFinderError::not_found("route", other)),
        }
    }
}

/// Issues navigation intents.
pub trait Navigator {
    /// Navigates to `route`, keeping the current page in history.
    fn push(&mut self, route: Route);

    /// Navigates to `route`, replacing the current history entry.
    fn replace(&mut self, route: Route);
}

/// Linear navigation history with a current entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
        }
    }

    pub fn current(&self) -> &Route {
        // `entries` is never empty: created with one entry, `back` keeps one.
        &self.entries[self.entries.len() - 1]
    }

    /// Returns to the previous entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator for History {
    fn push(&mut self, route: Route) {
        // Navigation is idempotent by destination
        if self.current() == &route {
            return;
        }
        tracing::debug!(to = %route, "push");
        self.entries.push(route);
    }

    fn replace(&mut self, route: Route) {
        tracing::debug!(to = %route, "replace");
        let last = self.entries.len() - 1;
        self.entries[last] = route;
    }
}
