//! Group-by aggregation over a result snapshot
//!
//! A snapshot is partitioned by a [`GroupingStrategy`] into [`Group`]s (in
//! first-encounter order), and each group is reduced to an immutable
//! [`GroupMetrics`] record.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::model::{ConstructorId, DriverId, Finish, RaceId, ResultRecord, YearSpan};
use crate::stats::numeric::{average_finish, average_grid, min_position, sum_points};

/// Type alias for a caller-supplied key function
pub type KeyFunction = Arc<dyn Fn(&ResultRecord) -> Option<String> + Send + Sync>;

/// Strategy for partitioning a snapshot
#[derive(Clone)]
pub enum GroupingStrategy {
    /// One group per driver
    Driver,
    /// One group per constructor
    Constructor,
    /// One group per race
    Race,
    /// One group per season; records without a race are dropped
    Year,
    /// One group per circuit name; records without a circuit are dropped
    Circuit,
    /// One group per circuit country; records without a country are dropped
    Country,
    /// One group per raw status string; records without a status are dropped
    Status,
    /// Custom key function; `None` drops the record
    Custom(KeyFunction),
}

impl fmt::Debug for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver => write!(f, "Driver"),
            Self::Constructor => write!(f, "Constructor"),
            Self::Race => write!(f, "Race"),
            Self::Year => write!(f, "Year"),
            Self::Circuit => write!(f, "Circuit"),
            Self::Country => write!(f, "Country"),
            Self::Status => write!(f, "Status"),
            Self::Custom(_) => write!(f, "Custom(<function>)"),
        }
    }
}

/// Key identifying one group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Driver(DriverId),
    Constructor(ConstructorId),
    Race(RaceId),
    Year(i32),
    Circuit(String),
    Country(String),
    Status(String),
    Custom(String),
}

impl GroupingStrategy {
    /// Key of `record` under this strategy, `None` when the record has no key
    pub fn key_of(&self, record: &ResultRecord) -> Option<GroupKey> {
        match self {
            Self::Driver => Some(GroupKey::Driver(record.driver_id)),
            Self::Constructor => Some(GroupKey::Constructor(record.constructor_id)),
            Self::Race => Some(GroupKey::Race(record.race_id)),
            Self::Year => record.year().map(GroupKey::Year),
            Self::Circuit => record
                .circuit_name()
                .map(|name| GroupKey::Circuit(name.to_string())),
            Self::Country => record
                .circuit_country()
                .map(|country| GroupKey::Country(country.to_string())),
            Self::Status => record
                .status
                .as_ref()
                .map(|status| GroupKey::Status(status.clone())),
            Self::Custom(key) => key(record).map(GroupKey::Custom),
        }
    }

    /// Partition `records` into groups under this strategy
    pub fn partition<'a>(&self, records: &'a [ResultRecord]) -> Vec<Group<'a, GroupKey>> {
        group_by(records, |record| self.key_of(record))
    }
}

/// Records sharing one key
#[derive(Debug, Clone)]
pub struct Group<'a, K> {
    pub key: K,
    pub records: Vec<&'a ResultRecord>,
}

impl<'a, K> Group<'a, K> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ResultRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn metrics(&self) -> GroupMetrics {
        GroupMetrics::from_records(&self.records)
    }
}

/// Partition records by `key`, keeping groups in first-encounter order.
///
/// Records whose key is `None` are dropped; every other record lands in
/// exactly one group.
pub fn group_by<'a, K, F>(records: &'a [ResultRecord], key: F) -> Vec<Group<'a, K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&ResultRecord) -> Option<K>,
{
    let (groups, _) = records.iter().fold(
        (Vec::<Group<'a, K>>::new(), HashMap::<K, usize>::new()),
        |(mut groups, mut index), record| {
            if let Some(k) = key(record) {
                match index.get(&k) {
                    Some(&slot) => groups[slot].records.push(record),
                    None => {
                        index.insert(k.clone(), groups.len());
                        groups.push(Group {
                            key: k,
                            records: vec![record],
                        });
                    }
                }
            }
            (groups, index)
        },
    );
    groups
}

/// Aggregate metrics of one group.
///
/// Averages are kept unrounded; rounding happens once when a view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMetrics {
    /// Number of records in the group
    pub count: usize,
    /// Number of distinct races in the group
    pub races: usize,
    pub total_points: f64,
    /// Records with `position == 1`
    pub wins: usize,
    /// Records with a classified position of 3 or better
    pub podiums: usize,
    /// Records with `grid == 1`
    pub poles: usize,
    /// Records with fastest-lap `rank == 1`
    pub fastest_laps: usize,
    /// Records with non-null, positive points
    pub points_finishes: usize,
    pub best_finish: Finish,
    pub avg_grid: f64,
    pub avg_finish: f64,
    /// Records with no classified position
    pub dnfs: usize,
    pub years: Option<YearSpan>,
}

impl GroupMetrics {
    pub fn from_records(records: &[&ResultRecord]) -> Self {
        let iter = || records.iter().copied();
        let distinct_races: HashSet<RaceId> = iter().map(|r| r.race_id).collect();

        Self {
            count: records.len(),
            races: distinct_races.len(),
            total_points: sum_points(iter()),
            wins: iter().filter(|r| r.is_win()).count(),
            podiums: iter().filter(|r| r.is_podium()).count(),
            poles: iter().filter(|r| r.is_pole()).count(),
            fastest_laps: iter().filter(|r| r.is_fastest_lap()).count(),
            points_finishes: iter().filter(|r| r.scored_points()).count(),
            best_finish: min_position(iter()),
            avg_grid: average_grid(iter()),
            avg_finish: average_finish(iter()),
            dnfs: iter().filter(|r| !r.is_classified()).count(),
            years: YearSpan::from_years(iter().filter_map(ResultRecord::year)),
        }
    }

    /// Metrics of a whole snapshot treated as one group
    pub fn from_snapshot(records: &[ResultRecord]) -> Self {
        let refs: Vec<&ResultRecord> = records.iter().collect();
        Self::from_records(&refs)
    }
}
