//! Results aggregation engine
//!
//! Pure functions over an immutable snapshot of [`ResultRecord`]s. Nothing in
//! this module performs I/O or fails; missing values are absorbed according
//! to each metric's null policy.
//!
//! [`ResultRecord`]: crate::model::ResultRecord

pub mod distribution;
pub mod grouping;
pub mod head_to_head;
pub mod numeric;
pub mod ranking;
pub mod status;

pub use distribution::{Bucket, Distribution};
pub use grouping::{group_by, Group, GroupKey, GroupMetrics, GroupingStrategy};
pub use head_to_head::{PairingSummary, Tally};
pub use numeric::Precision;
pub use ranking::{SortOrder, TOP_N};
pub use status::{classify, StatusCategory};
