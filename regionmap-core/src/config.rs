use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    error::StorageError,
    storage::{DeadlineStore, DocumentStore, JsonFileStore},
};

/// Where and how the affected-region registry is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Database (directory, for the file store) holding the collection
    pub database: String,
    /// Collection holding the registry document
    pub collection: String,
    /// Id of the single document holding the full region list
    pub document_id: String,
    /// Per-call deadline for storage calls, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database: "EMS".to_string(),
            collection: "MAP".to_string(),
            document_id: "affected_regions".to_string(),
            deadline_ms: None,
        }
    }
}

impl RegistryConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Open this config's collection under `root`, wrapped in a deadline check
    /// when one is configured.
    pub fn open_file_store(&self, root: impl AsRef<Path>) -> Result<Box<dyn DocumentStore>, StorageError> {
        let store = JsonFileStore::open(root, &self.database, &self.collection)?;
        let store: Box<dyn DocumentStore> = match self.deadline() {
            Some(deadline) => Box::new(DeadlineStore::new(store, deadline)),
            None => Box::new(store),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.database, "EMS");
        assert_eq!(config.collection, "MAP");
        assert_eq!(config.deadline(), None);
        assert_eq!(RegistryConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn partial_json() {
        let config = RegistryConfig::from_json(r#"{ "collection": "regions", "deadlineMs": 250 }"#).unwrap();
        assert_eq!(config.database, "EMS");
        assert_eq!(config.collection, "regions");
        assert_eq!(config.deadline(), Some(Duration::from_millis(250)));
        assert!(RegistryConfig::from_json(r#"{ "deadlineMs": "soon" }"#).is_err());
    }

    #[test]
    fn opens_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = RegistryConfig { deadline_ms: Some(10_000), ..Default::default() };
        let store = config.open_file_store(dir.path()).unwrap();
        assert_eq!(store.collection(), "MAP");
        assert!(dir.path().join("EMS").is_dir());
    }
}
