//! Data access for the aggregation engine
//!
//! The engine consumes a single capability, [`ResultSource::fetch_results`],
//! which materializes every result row in a [`Scope`] into an immutable
//! [`Snapshot`]. Aggregation borrows the snapshot and never writes back.

mod cache;
mod ergast;

pub use cache::CachedSource;
pub use ergast::CsvDataset;

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::model::{ConstructorId, DriverId, RaceId, ResultRecord};
use crate::Result;

/// Which result rows a snapshot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    All,
    Driver(DriverId),
    Constructor(ConstructorId),
    Race(RaceId),
}

impl Scope {
    /// Whether a record belongs to this scope
    pub fn contains(&self, record: &ResultRecord) -> bool {
        match *self {
            Scope::All => true,
            Scope::Driver(id) => record.driver_id == id,
            Scope::Constructor(id) => record.constructor_id == id,
            Scope::Race(id) => record.race_id == id,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Driver(id) => write!(f, "driver {id}"),
            Scope::Constructor(id) => write!(f, "constructor {id}"),
            Scope::Race(id) => write!(f, "race {id}"),
        }
    }
}

/// Immutable, fully materialized result set for one scope.
///
/// Cloning is cheap; clones share the same rows.
#[derive(Debug, Clone)]
pub struct Snapshot {
    scope: Scope,
    records: Arc<[ResultRecord]>,
}

impl Snapshot {
    pub fn new(scope: Scope, records: Vec<ResultRecord>) -> Self {
        Self {
            scope,
            records: records.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

impl Deref for Snapshot {
    type Target = [ResultRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Collaborator that materializes result rows
pub trait ResultSource {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot>;
}

impl<S: ResultSource + ?Sized> ResultSource for &S {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot> {
        (**self).fetch_results(scope)
    }
}

impl<S: ResultSource + ?Sized> ResultSource for Arc<S> {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot> {
        (**self).fetch_results(scope)
    }
}

/// Source backed by a vector of already joined records
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<ResultRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResultSource for InMemorySource {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot> {
        let records = self
            .records
            .iter()
            .filter(|record| scope.contains(record))
            .cloned()
            .collect();
        Ok(Snapshot::new(*scope, records))
    }
}
