//! Ordering and truncation of grouped rows
//!
//! All sorts are stable: rows that tie on the sort key keep the order in
//! which their groups were first encountered.

use std::cmp::Ordering;

/// Number of rows kept by top-N views
pub const TOP_N: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort by a floating metric
pub fn sort_by_metric<T, F>(mut rows: Vec<T>, order: SortOrder, metric: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| order.apply(metric(a).total_cmp(&metric(b))));
    rows
}

/// Stable sort by an ordered key
pub fn sort_by_key<T, K, F>(mut rows: Vec<T>, order: SortOrder, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    rows.sort_by(|a, b| order.apply(key(a).cmp(&key(b))));
    rows
}

/// Sort descending by a metric and keep the first `limit` rows
pub fn top_n_by<T, F>(rows: Vec<T>, limit: usize, metric: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut rows = sort_by_metric(rows, SortOrder::Descending, metric);
    rows.truncate(limit);
    rows
}
