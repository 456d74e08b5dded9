use std::time::Duration;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidHull {
    #[error("Ring contains a non-finite coordinate")]
    NonFinite,

    #[error("Ring of {0} vertices encloses no area")]
    Degenerate(usize),

    #[error("Ring is not a convex polygon in rotational order")]
    NotConvex,
}

/// Failures at the persistence boundary. All of them are recoverable: the
/// caller may retry, or `load()` to resynchronize.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error in collection {collection:?}: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize collection {collection:?}: {source}")]
    Serde {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Version conflict on {id:?}: expected {expected}, found {found}")]
    VersionConflict {
        id: String,
        expected: u64,
        found: u64,
    },

    #[error("Storage call took {elapsed:?}, deadline was {deadline:?}")]
    DeadlineExceeded {
        elapsed: Duration,
        deadline: Duration,
    },

    #[error("Malformed collection {collection:?}: {reason}")]
    Malformed {
        collection: String,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Stored affected-regions document is malformed: {0}")]
    MalformedDocument(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GeoJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid GeoJSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Polygon feature {index} has no outer ring")]
    MissingRing { index: usize },

    #[error("Polygon feature {index} has a position with fewer than 2 coordinates")]
    InvalidPosition { index: usize },

    #[error("Polygon feature {index}: {source}")]
    InvalidRing {
        index: usize,
        #[source]
        source: InvalidHull,
    },
}
