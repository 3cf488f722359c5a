pub mod config;
pub mod error;
pub mod location;
pub mod navigation;
pub mod notification;
pub mod profile;
pub mod search;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::LabFinderError;
