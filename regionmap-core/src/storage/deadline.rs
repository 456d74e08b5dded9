use std::time::{Duration, Instant};

use log::warn;

use super::{DocumentStore, StorageRequest, StorageResponse};
use crate::error::StorageError;

/// Reports calls to the wrapped store that take longer than `deadline`.
///
/// Calls are synchronous and are not interrupted: a late call has still run to
/// completion, so a late write may have landed. Callers that see
/// `DeadlineExceeded` on a write should `load()` before writing again.
#[derive(Debug)]
pub struct DeadlineStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S: DocumentStore> DeadlineStore<S> {
    pub fn new(inner: S, deadline: Duration) -> Self {
        DeadlineStore { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DocumentStore> DocumentStore for DeadlineStore<S> {
    fn collection(&self) -> &str {
        self.inner.collection()
    }

    fn execute(&mut self, request: StorageRequest) -> Result<StorageResponse, StorageError> {
        let start = Instant::now();
        let response = self.inner.execute(request)?;
        let elapsed = start.elapsed();
        if elapsed > self.deadline {
            warn!("{}: storage call took {:?}, deadline {:?}", self.collection(), elapsed, self.deadline);
            return Err(StorageError::DeadlineExceeded { elapsed, deadline: self.deadline });
        }
        Ok(response)
    }
}
