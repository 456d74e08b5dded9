use std::sync::{Arc, Mutex, MutexGuard};

use super::{AffectedRegion, Membership, RegionRegistry};
use crate::{error::RegistryError, r2::Coord, storage::DocumentStore};

/// A registry behind one exclusive lock, for use from several threads.
#[derive(Debug)]
pub struct SharedRegistry<S> {
    inner: Arc<Mutex<RegionRegistry<S>>>,
}

impl<S> Clone for SharedRegistry<S> {
    fn clone(&self) -> Self {
        SharedRegistry { inner: Arc::clone(&self.inner) }
    }
}

impl<S: DocumentStore> SharedRegistry<S> {
    pub fn new(registry: RegionRegistry<S>) -> Self {
        SharedRegistry { inner: Arc::new(Mutex::new(registry)) }
    }

    // Mutations commit only after persisting, so a poisoned registry is still consistent.
    fn lock(&self) -> MutexGuard<'_, RegionRegistry<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn load(&self) -> Result<(), RegistryError> {
        self.lock().load()
    }

    pub fn add_region(&self, region: impl Into<AffectedRegion>) -> Result<(), RegistryError> {
        self.lock().add_region(region)
    }

    pub fn remove_region(&self, region: &AffectedRegion) -> Result<bool, RegistryError> {
        self.lock().remove_region(region)
    }

    pub fn check_membership(&self, p: &Coord) -> Membership {
        self.lock().check_membership(p)
    }

    /// Snapshot of the current regions.
    pub fn regions(&self) -> Vec<AffectedRegion> {
        self.lock().regions().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<S: DocumentStore> From<RegionRegistry<S>> for SharedRegistry<S> {
    fn from(registry: RegionRegistry<S>) -> Self {
        SharedRegistry::new(registry)
    }
}
