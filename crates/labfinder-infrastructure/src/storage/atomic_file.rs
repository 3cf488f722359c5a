//! Atomic file operations with file locking.
//!
//! Provides a thin layer for safe concurrent access to small TOML and JSON
//! files: whole-file writes through a temporary file plus rename, and
//! read-modify-write cycles under an exclusive `fs2` lock.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use labfinder_core::LabFinderError;

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// Content could not be parsed in the file's format.
    ParseError { format: &'static str, message: String },
    /// Data could not be rendered in the file's format.
    RenderError { format: &'static str, message: String },
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::ParseError { format, message } => {
                write!(f, "{} parse error: {}", format, message)
            }
            AtomicFileError::RenderError { format, message } => {
                write!(f, "{} serialization error: {}", format, message)
            }
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl AtomicFileError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AtomicFileError::ParseError { .. })
    }
}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<AtomicFileError> for LabFinderError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(io) => io.into(),
            AtomicFileError::ParseError { format, message }
            | AtomicFileError::RenderError { format, message } => LabFinderError::Serialization {
                format: format.to_string(),
                message,
            },
            AtomicFileError::LockError(message) => LabFinderError::data_access(message),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
pub trait FileFormat {
    const NAME: &'static str;

    fn parse<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError>;

    fn render<T: Serialize>(data: &T) -> Result<String, AtomicFileError>;
}

/// TOML encoding (configuration).
pub struct Toml;

impl FileFormat for Toml {
    const NAME: &'static str = "TOML";

    fn parse<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError> {
        toml::from_str(content).map_err(|e| AtomicFileError::ParseError {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn render<T: Serialize>(data: &T) -> Result<String, AtomicFileError> {
        toml::to_string_pretty(data).map_err(|e| AtomicFileError::RenderError {
            format: Self::NAME,
            message: e.to_string(),
        })
    }
}

/// JSON encoding (key-value storage).
pub struct Json;

impl FileFormat for Json {
    const NAME: &'static str = "JSON";

    fn parse<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError> {
        serde_json::from_str(content).map_err(|e| AtomicFileError::ParseError {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn render<T: Serialize>(data: &T) -> Result<String, AtomicFileError> {
        serde_json::to_string_pretty(data).map_err(|e| AtomicFileError::RenderError {
            format: Self::NAME,
            message: e.to_string(),
        })
    }
}

/// A handle to a file that is only ever replaced whole.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: File locking prevents concurrent read-modify-write
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T, F> {
    path: PathBuf,
    _phantom: PhantomData<(T, F)>,
}

pub type AtomicTomlFile<T> = AtomicFile<T, Toml>;
pub type AtomicJsonFile<T> = AtomicFile<T, Json>;

impl<T, F> AtomicFile<T, F>
where
    T: Serialize + DeserializeOwned,
    F: FileFormat,
{
    /// Creates a new atomic file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        F::parse(&content).map(Some)
    }

    /// Saves data to the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let rendered = F::render(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(rendered.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// The update function receives the current data (or `default_value`
    /// when the file is missing, empty, or unparseable) and may modify it.
    /// If it returns `Ok(())`, the result is written back atomically.
    /// Unparseable content is logged and replaced.
    pub fn update<U>(&self, default_value: T, f: U) -> Result<(), AtomicFileError>
    where
        U: FnOnce(&mut T) -> Result<(), AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => default_value,
            Err(e) if e.is_parse_error() => {
                tracing::warn!(path = ?self.path, error = %e, "Replacing unreadable file");
                default_value
            }
            Err(e) => return Err(e),
        };

        f(&mut data)?;

        self.save(&data)
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Exclusive lock on a sibling `.lock` file, released when dropped.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<TestConfig>::new(temp_dir.path().join("test.toml"));

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&config).unwrap();

        assert_eq!(file.load().unwrap(), Some(config));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestConfig>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_counts_up() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<BTreeMap<String, u32>>::new(temp_dir.path().join("c.json"));

        for _ in 0..3 {
            file.update(BTreeMap::new(), |map| {
                *map.entry("hits".to_string()).or_default() += 1;
                Ok(())
            })
            .unwrap();
        }

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.get("hits"), Some(&3));
    }

    #[test]
    fn test_update_replaces_unparseable_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let file = AtomicJsonFile::<BTreeMap<String, String>>::new(path);

        assert!(file.load().unwrap_err().is_parse_error());

        file.update(BTreeMap::new(), |map| {
            map.insert("k".to_string(), "v".to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let file = AtomicTomlFile::<TestConfig>::new(file_path.clone());

        file.save(&TestConfig {
            name: "test".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_parse_error_converts_to_serialization() {
        let err = AtomicFileError::ParseError {
            format: "JSON",
            message: "eof".to_string(),
        };
        let err: LabFinderError = err.into();
        assert!(err.is_serialization());
    }
}
