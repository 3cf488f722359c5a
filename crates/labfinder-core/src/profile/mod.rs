//! Profile gating: the durable store, the session state machine, and the
//! guard that keeps protected pages behind a complete profile.

mod guard;
mod session;
mod store;

pub use guard::{GuardDecision, ProfileGuard};
pub use session::{ProfileSession, SessionState};
pub use store::{PROFILE_KEY, ProfileStore};
