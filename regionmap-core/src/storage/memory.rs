use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Document, DocumentStore, StorageRequest, StorageResponse};
use crate::error::StorageError;

/// The documents of one collection, keyed by id. Shared by the store adapters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    docs: BTreeMap<String, Document>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Apply `request`. Returns whether the collection changed, with the response.
    pub fn apply(&mut self, name: &str, request: StorageRequest) -> Result<(bool, StorageResponse), StorageError> {
        match request {
            StorageRequest::Find(query) => {
                Ok((false, StorageResponse::Found(self.docs.get(&query.id).cloned())))
            }
            StorageRequest::UpdateOrInsert { query, fields, expected_version } => {
                let found = self.docs.get(&query.id).map(|doc| doc.version).unwrap_or(0);
                if let Some(expected) = expected_version {
                    if expected != found {
                        return Err(StorageError::VersionConflict { id: query.id, expected, found });
                    }
                }
                let doc = self.docs.entry(query.id.clone()).or_insert_with(|| Document {
                    id: query.id.clone(),
                    version: 0,
                    fields: Default::default(),
                });
                doc.fields.extend(fields);
                doc.version += 1;
                debug!("{}: wrote {:?} at version {}", name, query.id, doc.version);
                Ok((true, StorageResponse::Modified(1)))
            }
            StorageRequest::Delete(query) => {
                let removed = self.docs.remove(&query.id).is_some();
                Ok((removed, StorageResponse::Deleted(removed as usize)))
            }
        }
    }
}

/// In-process store for one collection.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    name: String,
    collection: Collection,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryStore { name: name.into(), collection: Collection::new() }
    }

    pub fn documents(&self) -> &Collection {
        &self.collection
    }
}

impl DocumentStore for MemoryStore {
    fn collection(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, request: StorageRequest) -> Result<StorageResponse, StorageError> {
        self.collection.apply(&self.name, request).map(|(_, response)| response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};
    use test_log::test;

    use super::*;
    use crate::storage::Query;

    fn fields(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn upsert_then_find() {
        let mut store = MemoryStore::new("MAP");
        assert_eq!(store.collection(), "MAP");
        assert_eq!(store.find(Query::id("a")).unwrap(), None);

        assert_eq!(store.update_or_insert(Query::id("a"), fields(json!({ "k": 1 })), None).unwrap(), 1);
        let doc = store.find(Query::id("a")).unwrap().unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.fields["k"], json!(1));

        // Merge, like `$set`
        store.update_or_insert(Query::id("a"), fields(json!({ "j": "x" })), None).unwrap();
        let doc = store.find(Query::id("a")).unwrap().unwrap();
        assert_eq!(doc.version, 2);
        assert_eq!(doc.fields["k"], json!(1));
        assert_eq!(doc.fields["j"], json!("x"));
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn conditional_upsert() {
        let mut store = MemoryStore::new("MAP");
        store.update_or_insert(Query::id("a"), fields(json!({ "k": 1 })), Some(0)).unwrap();
        store.update_or_insert(Query::id("a"), fields(json!({ "k": 2 })), Some(1)).unwrap();
        let err = store.update_or_insert(Query::id("a"), fields(json!({ "k": 3 })), Some(1)).unwrap_err();
        match err {
            StorageError::VersionConflict { id, expected, found } => {
                assert_eq!(id, "a");
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(store.find(Query::id("a")).unwrap().unwrap().fields["k"], json!(2));

        // Absent documents are version 0
        assert!(store.update_or_insert(Query::id("b"), Map::new(), Some(3)).is_err());
    }

    #[test]
    fn delete() {
        let mut store = MemoryStore::new("MAP");
        store.update_or_insert(Query::id("a"), Map::new(), None).unwrap();
        assert_eq!(store.delete(Query::id("a")).unwrap(), 1);
        assert_eq!(store.delete(Query::id("a")).unwrap(), 0);
        assert!(store.documents().is_empty());
    }
}
