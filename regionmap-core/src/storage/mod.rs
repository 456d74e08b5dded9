//! Persistence boundary: a typed document-store contract scoped to one named
//! collection, plus in-memory, JSON-file and deadline-checking adapters.
//!
//! Each document is addressed by an id and carries a version that increases by
//! one on every write. `UpdateOrInsert` merges its fields into the stored
//! document (creating it if absent), and can be made conditional on the
//! version the caller last saw.

mod deadline;
mod file;
mod memory;

pub use deadline::DeadlineStore;
pub use file::JsonFileStore;
pub use memory::{Collection, MemoryStore};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Selects a document by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub id: String,
}

impl Query {
    pub fn id(id: impl Into<String>) -> Self {
        Query { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub version: u64,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageRequest {
    Find(Query),
    UpdateOrInsert {
        query: Query,
        fields: Map<String, Value>,
        /// Fail with `VersionConflict` unless the stored version equals this
        /// (an absent document has version 0).
        expected_version: Option<u64>,
    },
    Delete(Query),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageResponse {
    Found(Option<Document>),
    /// Documents written.
    Modified(usize),
    /// Documents deleted.
    Deleted(usize),
}

pub trait DocumentStore {
    /// Name of the collection this store is scoped to.
    fn collection(&self) -> &str;

    fn execute(&mut self, request: StorageRequest) -> Result<StorageResponse, StorageError>;

    fn find(&mut self, query: Query) -> Result<Option<Document>, StorageError> {
        match self.execute(StorageRequest::Find(query))? {
            StorageResponse::Found(doc) => Ok(doc),
            other => Err(unexpected(self.collection(), "Find", &other)),
        }
    }

    fn update_or_insert(
        &mut self,
        query: Query,
        fields: Map<String, Value>,
        expected_version: Option<u64>,
    ) -> Result<usize, StorageError> {
        match self.execute(StorageRequest::UpdateOrInsert { query, fields, expected_version })? {
            StorageResponse::Modified(n) => Ok(n),
            other => Err(unexpected(self.collection(), "UpdateOrInsert", &other)),
        }
    }

    fn delete(&mut self, query: Query) -> Result<usize, StorageError> {
        match self.execute(StorageRequest::Delete(query))? {
            StorageResponse::Deleted(n) => Ok(n),
            other => Err(unexpected(self.collection(), "Delete", &other)),
        }
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn collection(&self) -> &str {
        (**self).collection()
    }

    fn execute(&mut self, request: StorageRequest) -> Result<StorageResponse, StorageError> {
        (**self).execute(request)
    }
}

fn unexpected(collection: &str, request: &str, response: &StorageResponse) -> StorageError {
    StorageError::Malformed {
        collection: collection.to_string(),
        reason: format!("{} answered with {:?}", request, response),
    }
}
