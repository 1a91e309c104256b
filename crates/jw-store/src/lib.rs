//! File-backed storage for the worklog console.
//!
//! Documents live as `<name>.json` files inside one data directory. The
//! directory carries a marker file created by [`FileStore::init`]; every
//! read and write checks for it first, so a store that was never
//! initialized fails cleanly instead of scattering files.
//!
//! Writes are whole-file replaces; there is no partial-write recovery
//! beyond that, because the tool runs as a one-shot process and each
//! operation is a single read-modify-write cycle.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jw_core::{Store, StoreError};

const MARKER_FILE: &str = "init";
const DOC_EXTENSION: &str = "json";

/// A document store rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a handle; the directory is not touched until `init` or the
    /// first read/write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the data directory and its marker file.
    ///
    /// Fails with [`StoreError::AlreadyInitialized`] when the marker is
    /// already present.
    pub fn init(&self) -> Result<(), StoreError> {
        if self.marker_path().exists() {
            return Err(StoreError::AlreadyInitialized);
        }
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.marker_path(), b"")?;
        Ok(())
    }

    /// Whether `init` has run for this directory.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.marker_path().exists()
    }

    fn marker_path(&self) -> PathBuf {
        self.dir.join(MARKER_FILE)
    }

    fn doc_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{DOC_EXTENSION}"))
    }

    fn check_initialized(&self) -> Result<(), StoreError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }
}

impl Store for FileStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.check_initialized()?;
        match std::fs::read(self.doc_path(name)) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                name: name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        self.check_initialized()?;
        std::fs::write(self.doc_path(name), data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write_require_init() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("jw"));

        assert!(matches!(
            store.read("timeline"),
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.write("timeline", b"{}"),
            Err(StoreError::NotInitialized)
        ));
    }

    #[test]
    fn init_round_trips_documents() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("jw"));
        store.init().unwrap();

        store.write("timeline", br#"{"List":[]}"#).unwrap();
        assert_eq!(store.read("timeline").unwrap(), br#"{"List":[]}"#);
        assert!(temp.path().join("jw/timeline.json").exists());
    }

    #[test]
    fn init_twice_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("jw"));
        store.init().unwrap();
        assert!(matches!(store.init(), Err(StoreError::AlreadyInitialized)));
    }

    #[test]
    fn missing_documents_are_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("jw"));
        store.init().unwrap();

        assert!(matches!(
            store.read("timeline"),
            Err(StoreError::NotFound { name }) if name == "timeline"
        ));
    }

    #[test]
    fn writes_replace_the_whole_document() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("jw"));
        store.init().unwrap();

        store.write("config", b"{\"tags\":[\"infra\",\"dev\"]}").unwrap();
        store.write("config", b"{}").unwrap();
        assert_eq!(store.read("config").unwrap(), b"{}");
    }
}
