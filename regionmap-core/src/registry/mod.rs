//! The affected-region registry: an ordered list of regions, written through
//! to a single persisted document on every mutation.

mod region;
mod shared;

pub use region::{AffectedRegion, Membership};
pub use shared::SharedRegistry;

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use log::{debug, info};
use serde::Deserialize;
use serde_json::Map;

use crate::{
    contains::first_containing,
    error::RegistryError,
    r2::Coord,
    storage::{DocumentStore, Query},
};

/// Field of the registry document holding the region list.
pub const REGIONS_FIELD: &str = "affected_regions";

/// In-memory cache of the persisted region list.
///
/// Mutations are persisted first and committed to memory only once the store
/// acknowledged them, so a failed write leaves `regions()` untouched. Writes
/// are conditional on the document version last read or written; a concurrent
/// writer surfaces as `StorageError::VersionConflict`, and `load()` resyncs.
#[derive(Debug)]
pub struct RegionRegistry<S> {
    store: S,
    document_id: String,
    regions: Vec<AffectedRegion>,
    version: u64,
}

impl<S: DocumentStore> RegionRegistry<S> {
    /// Empty registry over `store`; call `load()` to pick up persisted regions.
    pub fn new(store: S, document_id: impl Into<String>) -> Self {
        RegionRegistry { store, document_id: document_id.into(), regions: Vec::new(), version: 0 }
    }

    /// Registry populated from `store`.
    pub fn open(store: S, document_id: impl Into<String>) -> Result<Self, RegistryError> {
        let mut registry = Self::new(store, document_id);
        registry.load()?;
        Ok(registry)
    }

    /// Replace the in-memory list with the persisted one. A missing document,
    /// or one without a region list, loads as empty.
    pub fn load(&mut self) -> Result<(), RegistryError> {
        let query = self.query();
        let (regions, version) = match self.store.find(query)? {
            None => (Vec::new(), 0),
            Some(doc) => {
                let regions = match doc.fields.get(REGIONS_FIELD) {
                    None => Vec::new(),
                    Some(value) => {
                        Vec::<AffectedRegion>::deserialize(value).map_err(RegistryError::MalformedDocument)?
                    }
                };
                (regions, doc.version)
            }
        };
        info!("{}: loaded {} affected regions (version {})", self.store.collection(), regions.len(), version);
        self.regions = regions;
        self.version = version;
        Ok(())
    }

    /// Append `region` and persist the full list. Duplicates are kept.
    pub fn add_region(&mut self, region: impl Into<AffectedRegion>) -> Result<(), RegistryError> {
        let region = region.into();
        debug!("adding {}", region);
        let mut next = self.regions.clone();
        next.push(region);
        self.persist(next)
    }

    /// Remove the first region equal to `region` and persist the list. Returns
    /// `false`, without writing, when no region matches.
    pub fn remove_region(&mut self, region: &AffectedRegion) -> Result<bool, RegistryError> {
        let Some(idx) = self.regions.iter().position(|r| r == region) else {
            debug!("not removing {}: not present", region);
            return Ok(false);
        };
        let mut next = self.regions.clone();
        next.remove(idx);
        self.persist(next)?;
        debug!("removed {}", region);
        Ok(true)
    }

    /// `Affected` if any region contains `p` (boundary included).
    pub fn check_membership(&self, p: &Coord) -> Membership {
        match first_containing(&self.regions, p) {
            Some(idx) => {
                debug!("{} in region {}: {}", p, idx, self.regions[idx]);
                Membership::Affected
            }
            None => Membership::Unaffected,
        }
    }

    pub fn regions(&self) -> &[AffectedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Version of the persisted document this registry last saw.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn query(&self) -> Query {
        Query::id(self.document_id.clone())
    }

    fn persist(&mut self, next: Vec<AffectedRegion>) -> Result<(), RegistryError> {
        let value = serde_json::to_value(&next).map_err(RegistryError::MalformedDocument)?;
        let mut fields = Map::new();
        fields.insert(REGIONS_FIELD.to_string(), value);
        let query = self.query();
        self.store.update_or_insert(query, fields, Some(self.version))?;
        self.version += 1;
        self.regions = next;
        Ok(())
    }
}

impl<S: DocumentStore> Display for RegionRegistry<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RegionRegistry(affected regions=[{}])", self.regions.iter().join(", "))
    }
}
