//! Read-through snapshot cache
//!
//! A snapshot is only inserted after the inner fetch has completed, so a
//! reader either finds no entry or a complete one.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use super::{ResultSource, Scope, Snapshot};
use crate::Result;

/// Memoizes snapshots of an inner source per scope
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    snapshots: RwLock<HashMap<Scope, Snapshot>>,
}

impl<S: ResultSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached scopes
    pub fn cached(&self) -> usize {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop every cached snapshot
    pub fn clear(&self) {
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<S: ResultSource> ResultSource for CachedSource<S> {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot> {
        let hit = self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scope)
            .cloned();
        if let Some(snapshot) = hit {
            debug!("Snapshot cache hit for {}", scope);
            return Ok(snapshot);
        }

        let snapshot = self.inner.fetch_results(scope)?;
        let mut snapshots = self
            .snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(snapshots.entry(*scope).or_insert(snapshot).clone())
    }
}
