use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info};

use super::{Collection, DocumentStore, StorageRequest, StorageResponse};
use crate::error::StorageError;

/// Collection persisted as one JSON file, `<root>/<database>/<collection>.json`.
///
/// The file is the source of truth: every call re-reads it, and every mutation
/// rewrites it (temp file, then rename), so stores opened on the same file see
/// each other's writes and conditional upserts detect them.
#[derive(Debug)]
pub struct JsonFileStore {
    name: String,
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(root: impl AsRef<Path>, database: &str, collection: &str) -> Result<Self, StorageError> {
        let dir = root.as_ref().join(database);
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io { collection: collection.to_string(), source })?;
        let store = JsonFileStore {
            name: collection.to_string(),
            path: dir.join(format!("{}.json", collection)),
        };
        let docs = store.read()?;
        info!(
            "Opened {} | Database: {} | Collection: {} | {} documents",
            store.path.display(),
            database,
            collection,
            docs.len(),
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the store. Every mutation is already on disk.
    pub fn close(self) {
        info!("Closed {}", self.path.display());
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { collection: self.name.clone(), source }
    }

    fn serde_err(&self, source: serde_json::Error) -> StorageError {
        StorageError::Serde { collection: self.name.clone(), source }
    }

    fn read(&self) -> Result<Collection, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| self.serde_err(e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Collection::new()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn write(&self, collection: &Collection) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(collection).map_err(|e| self.serde_err(e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        debug!("wrote {} documents to {}", collection.len(), self.path.display());
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn collection(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, request: StorageRequest) -> Result<StorageResponse, StorageError> {
        let mut docs = self.read()?;
        let (changed, response) = docs.apply(&self.name, request)?;
        if changed {
            self.write(&docs)?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};
    use test_log::test;

    use super::*;
    use crate::storage::Query;

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        assert_eq!(store.path(), dir.path().join("EMS").join("MAP.json"));
        assert_eq!(store.find(Query::id("a")).unwrap(), None);

        let fields = json!({ "k": [1, 2] }).as_object().unwrap().clone();
        store.update_or_insert(Query::id("a"), fields, None).unwrap();
        store.close();

        let mut store = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        let doc = store.find(Query::id("a")).unwrap().unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.fields["k"], json!([1, 2]));

        assert_eq!(store.delete(Query::id("a")).unwrap(), 1);
        store.close();
        let mut store = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        assert_eq!(store.find(Query::id("a")).unwrap(), None);
    }

    #[test]
    fn stores_on_one_file_see_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        let mut b = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        a.update_or_insert(Query::id("doc"), Map::new(), Some(0)).unwrap();
        assert_eq!(b.find(Query::id("doc")).unwrap().unwrap().version, 1);
        let err = b.update_or_insert(Query::id("doc"), Map::new(), Some(0)).unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { found: 1, .. }), "{}", err);
    }

    #[test]
    fn failed_write_is_not_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap();
        store.update_or_insert(Query::id("a"), Map::new(), None).unwrap();

        // A directory where the temp file should go makes the next write fail
        fs::create_dir(dir.path().join("EMS").join("MAP.json.tmp")).unwrap();

        let err = store.update_or_insert(Query::id("b"), Map::new(), None).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }), "{}", err);
        assert_eq!(store.find(Query::id("b")).unwrap(), None);
        assert_eq!(store.find(Query::id("a")).unwrap().unwrap().version, 1);
    }

    #[test]
    fn malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("EMS")).unwrap();
        fs::write(dir.path().join("EMS").join("MAP.json"), "not json").unwrap();
        let err = JsonFileStore::open(dir.path(), "EMS", "MAP").unwrap_err();
        assert!(matches!(err, StorageError::Serde { .. }), "{}", err);
    }
}
