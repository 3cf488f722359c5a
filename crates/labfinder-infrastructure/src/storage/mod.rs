//! Storage layer for atomic file operations and the durable key-value store.

mod atomic_file;
mod local_storage;

pub use atomic_file::{
    AtomicFile, AtomicFileError, AtomicJsonFile, AtomicTomlFile, FileFormat, Json, Toml,
};
pub use local_storage::FileKeyValueStore;
