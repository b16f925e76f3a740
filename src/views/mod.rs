//! Aggregation views
//!
//! Each view takes one snapshot and returns serializable rows whose field
//! names form the external contract (`totalPoints`, `bestFinish`,
//! `yearsActive`, ...). Floating metrics are rounded here, once, as rows are
//! rendered; sorting uses the unrounded values.

pub mod comparison;
pub mod constructor;
pub mod driver;

pub use comparison::{dnf_causes, head_to_head, DnfCauseRow, HeadToHeadRow};
pub use constructor::{
    circuits as constructor_circuits, dashboard, driver_stats, geo_performance, points_heatmap,
    seasons, status_breakdown, CircuitRow, Dashboard, DriverStatsRow, GeoRow, HeatmapRow,
    SeasonRow, StatusBreakdownRow,
};
pub use driver::{
    career, circuits as driver_circuits, evolution, positions, status_counts, teammates,
    trajectory, CareerSummary, DriverCircuitRow, EvolutionRow, PositionCountRow, StatusCountRow,
    TeamStint, TeammateRow, TrajectoryRow,
};

use crate::model::{DriverInfo, ResultRecord, YearSpan};

/// Label used when a group has no season information at all
pub const NO_YEARS_LABEL: &str = "N/A";

/// `firstYear`, `lastYear` and `yearsActive` of a group
pub(crate) fn year_fields(span: Option<YearSpan>) -> (Option<i32>, Option<i32>, String) {
    match span {
        Some(span) => (Some(span.first), Some(span.last), span.to_string()),
        None => (None, None, NO_YEARS_LABEL.to_string()),
    }
}

/// First driver identity carried by any of the records
pub(crate) fn driver_info<'a, I>(records: I) -> Option<&'a DriverInfo>
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    records.into_iter().find_map(|record| record.driver.as_ref())
}
