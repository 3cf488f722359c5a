//! Profile Guard: the one gate in front of every protected page.

use super::session::ProfileSession;
use crate::navigation::{Navigator, Route};

/// Outcome of a guard check for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is not ready yet. Render nothing, navigate nowhere.
    Pending,
    /// The profile is complete. Render the wrapped content.
    Allow,
    /// The profile is incomplete. Render nothing.
    Deny,
}

/// Gates content behind a complete profile.
///
/// While the profile is incomplete the guard suppresses content and fires
/// its redirect once. Repeated checks during the same incompleteness
/// episode do not fire again; the episode ends the first time the guard
/// sees a complete profile.
#[derive(Debug, Clone)]
pub struct ProfileGuard {
    destination: Route,
    redirect_issued: bool,
}

impl ProfileGuard {
    /// Creates a guard that redirects to profile creation.
    pub fn new() -> Self {
        Self::redirecting_to(Route::Profile)
    }

    /// Creates a guard with a custom redirect destination.
    ///
    /// The destination must not itself be gated, or the guard would loop.
    pub fn redirecting_to(destination: Route) -> Self {
        debug_assert!(!destination.requires_profile());
        Self {
            destination,
            redirect_issued: false,
        }
    }

    pub fn destination(&self) -> &Route {
        &self.destination
    }

    /// Checks the session, calling `on_incomplete` at most once per
    /// incompleteness episode.
    pub fn require_complete_profile(
        &mut self,
        session: &ProfileSession,
        on_incomplete: impl FnOnce(),
    ) -> GuardDecision {
        if !session.is_ready() {
            return GuardDecision::Pending;
        }

        if session.is_complete() {
            self.redirect_issued = false;
            return GuardDecision::Allow;
        }

        if !self.redirect_issued {
            self.redirect_issued = true;
            tracing::debug!(to = %self.destination, "Profile incomplete, redirecting");
            on_incomplete();
        }
        GuardDecision::Deny
    }

    /// Renders `content` when the profile is complete. Otherwise renders
    /// nothing and, once per episode, pushes the redirect destination.
    pub fn render<T>(
        &mut self,
        session: &ProfileSession,
        navigator: &mut dyn Navigator,
        content: impl FnOnce() -> T,
    ) -> Option<T> {
        let destination = self.destination.clone();
        match self.require_complete_profile(session, || navigator.push(destination)) {
            GuardDecision::Allow => Some(content()),
            GuardDecision::Pending | GuardDecision::Deny => None,
        }
    }
}

impl Default for ProfileGuard {
    fn default() -> Self {
        Self::new()
    }
}
