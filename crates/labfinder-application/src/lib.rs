//! Application layer for LabFinder.
//!
//! This crate provides the page controllers and the router that coordinate
//! the profile session, the pending-search cache and the infrastructure
//! adapters.

pub mod app;
pub mod bootstrap;
pub mod pages;
pub mod scope;
pub mod toasts;

pub use app::LabFinderApp;
pub use bootstrap::build_app;
pub use pages::View;
pub use scope::ViewScope;
