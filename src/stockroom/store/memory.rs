use super::{render, DataStore, Payload, EMPTY_CATALOG};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_FILE: &str = "inventory.json";

/// In-memory storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore {
    data_file: PathBuf,
    files: HashMap<PathBuf, String>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            files: HashMap::new(),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `path` with raw text, valid JSON or not.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl DataStore for InMemoryStore {
    fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn save(&mut self, path: &Path, payload: &Payload<'_>) -> Result<()> {
        let content = render(payload)?;
        self.files.insert(path.to_path_buf(), content);
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<Value> {
        let text = self
            .files
            .entry(path.to_path_buf())
            .or_insert_with(|| EMPTY_CATALOG.to_string());
        Ok(serde_json::from_str(text.as_str())?)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Record;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Seeds the default data file with a plain list of records.
        pub fn with_records(mut self, records: &[Record]) -> Self {
            let path = self.store.data_file().to_path_buf();
            self.store.save(&path, &Payload::Records(records)).unwrap();
            self
        }

        pub fn with_raw(mut self, text: &str) -> Self {
            let path = self.store.data_file().to_path_buf();
            self.store = self.store.with_file(path, text);
            self
        }
    }
}
