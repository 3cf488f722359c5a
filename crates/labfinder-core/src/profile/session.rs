//! Profile Session: the in-memory authority for the current user's profile.
//!
//! ```text
//! Uninitialized --initialize()--> Loading --+--> Empty
//!                                           +--> Populated
//! Empty --set_profile()--> Populated --logout()--> Empty
//! Populated --set_profile()--> Populated
//! ```
//!
//! The session is the single writable owner of the profile. Consumers get
//! `&ProfileSession` and can only read; mutation needs `&mut`.

use serde::Serialize;

use super::store::ProfileStore;
use crate::error::Result;
use crate::user::UserProfile;

/// Observable state of a [`ProfileSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// Constructed, the store has not been read yet.
    Uninitialized,
    /// The store is being read.
    Loading,
    /// Ready, no profile.
    Empty,
    /// Ready, holding a complete profile.
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

pub struct ProfileSession {
    store: ProfileStore,
    profile: Option<UserProfile>,
    phase: Phase,
}

impl ProfileSession {
    /// Creates a session that has not read the store yet.
    pub fn new(store: ProfileStore) -> Self {
        Self {
            store,
            profile: None,
            phase: Phase::Uninitialized,
        }
    }

    /// Creates a session and initializes it from the store in one step.
    pub fn open(store: ProfileStore) -> Self {
        let mut session = Self::new(store);
        session.initialize();
        session
    }

    /// Reads the persisted profile and makes the session ready.
    ///
    /// A missing record leaves the session `Empty`. A record that cannot be
    /// read or parsed is treated as absent and logged; nothing is returned to
    /// the caller. Calling this on a ready session does nothing.
    pub fn initialize(&mut self) {
        if self.phase == Phase::Ready {
            return;
        }
        self.phase = Phase::Loading;

        self.profile = match self.store.load() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Stored profile is unreadable, starting without one");
                None
            }
        };
        self.phase = Phase::Ready;

        tracing::info!(state = ?self.state(), "Profile session initialized");
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Uninitialized => SessionState::Uninitialized,
            Phase::Loading => SessionState::Loading,
            Phase::Ready if self.profile.is_some() => SessionState::Populated,
            Phase::Ready => SessionState::Empty,
        }
    }

    /// True once initialization finished. Nothing may observe the profile
    /// before this.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// True exactly when a profile is held.
    pub fn is_complete(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Replaces the profile and writes it through to the store.
    ///
    /// The input is trusted; validation belongs to the form layer. The
    /// durable write happens first, so when it fails the in-memory profile
    /// is unchanged and the store still mirrors the session.
    pub fn set_profile(&mut self, profile: UserProfile) -> Result<()> {
        self.store.save(&profile)?;

        let replaced = self.profile.replace(profile).is_some();
        self.phase = Phase::Ready;
        tracing::info!(replaced, "Profile stored");
        Ok(())
    }

    /// Drops the profile from memory and from the store. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;

        if self.profile.take().is_some() {
            tracing::info!("Profile cleared");
        }
        self.phase = Phase::Ready;
        Ok(())
    }
}
