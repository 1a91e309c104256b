//! Storage collaborator contract.
//!
//! The timeline, configuration and credentials are each one named document;
//! a store maps names to whole documents and replaces them atomically from
//! the caller's point of view. Reads and writes require the store to have
//! been initialized once (`jw init`).

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has never been initialized.
    #[error("storage is not initialized, run init first")]
    NotInitialized,

    /// The store was initialized before.
    #[error("storage is already initialized")]
    AlreadyInitialized,

    /// No document with the given name exists.
    #[error("no stored document named '{name}'")]
    NotFound { name: String },

    /// An error from the underlying filesystem.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read/write-bytes-by-name storage.
///
/// Writes have whole-document replace semantics: a document is never
/// partially visible to a subsequent read.
pub trait Store {
    /// Reads the named document.
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Writes the named document, replacing any previous content.
    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// An in-memory store.
///
/// Useful for testing: it satisfies the same contract as the file-backed
/// store without touching the filesystem, and exposes the raw bytes of a
/// document so tests can assert that failed operations left the persisted
/// state untouched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw bytes of a document, if present.
    #[must_use]
    pub fn document(&self, name: &str) -> Option<Vec<u8>> {
        self.docs.borrow().get(name).cloned()
    }
}

impl Store for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.docs
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        self.docs
            .borrow_mut()
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_documents() {
        let store = MemoryStore::new();
        store.write("timeline", b"{}").unwrap();
        assert_eq!(store.read("timeline").unwrap(), b"{}");
    }

    #[test]
    fn memory_store_reports_missing_documents() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.read("timeline"),
            Err(StoreError::NotFound { name }) if name == "timeline"
        ));
    }

    #[test]
    fn memory_store_replaces_whole_documents() {
        let store = MemoryStore::new();
        store.write("config", b"first").unwrap();
        store.write("config", b"second").unwrap();
        assert_eq!(store.document("config").unwrap(), b"second");
    }
}
