//! Views spanning more than one driver or constructor

use serde::Serialize;
use tracing::debug;

use super::driver_info;
use crate::model::{DriverId, ResultRecord};
use crate::stats::head_to_head::compare;
use crate::stats::ranking::{sort_by_key, SortOrder};
use crate::stats::{classify, group_by, Precision, StatusCategory};

/// Number of causes kept by [`dnf_causes`]
pub const DNF_CAUSES_LIMIT: usize = 15;

/// Two drivers compared over the races they both entered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadRow {
    pub driver1_id: DriverId,
    pub driver2_id: DriverId,
    pub driver1: String,
    pub driver2: String,
    pub shared_races: usize,
    pub driver1_ahead: usize,
    pub driver2_ahead: usize,
    pub driver1_quali_ahead: usize,
    pub driver2_quali_ahead: usize,
    pub driver1_points: f64,
    pub driver2_points: f64,
    pub driver1_wins: usize,
    pub driver2_wins: usize,
}

fn display_name(driver_id: DriverId, records: &[ResultRecord]) -> String {
    driver_info(records)
        .map(|info| format!("{} {}", info.forename, info.surname))
        .unwrap_or_else(|| driver_id.to_string())
}

/// Compare two drivers' result sets.
///
/// Always yields a row; with no shared races every counter is zero.
pub fn head_to_head(
    first_id: DriverId,
    first: &[ResultRecord],
    second_id: DriverId,
    second: &[ResultRecord],
) -> HeadToHeadRow {
    let summary = compare(first, second);
    debug!(
        first = first_id,
        second = second_id,
        shared = summary.shared_races,
        "Compared drivers"
    );

    HeadToHeadRow {
        driver1_id: first_id,
        driver2_id: second_id,
        driver1: display_name(first_id, first),
        driver2: display_name(second_id, second),
        shared_races: summary.shared_races,
        driver1_ahead: summary.race.ahead,
        driver2_ahead: summary.race.behind,
        driver1_quali_ahead: summary.quali.ahead,
        driver2_quali_ahead: summary.quali.behind,
        driver1_points: Precision::Hundredths.round(summary.first_points),
        driver2_points: Precision::Hundredths.round(summary.second_points),
        driver1_wins: summary.first_wins,
        driver2_wins: summary.second_wins,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnfCauseRow {
    pub status: String,
    pub count: usize,
}

/// Most frequent non-finishing statuses
pub fn dnf_causes(records: &[ResultRecord]) -> Vec<DnfCauseRow> {
    let rows: Vec<DnfCauseRow> = group_by(records, |record| {
        record
            .status
            .as_deref()
            .filter(|status| classify(status) != StatusCategory::Finished)
            .map(str::to_string)
    })
    .into_iter()
    .map(|group| DnfCauseRow {
        count: group.len(),
        status: group.key,
    })
    .collect();

    let mut rows = sort_by_key(rows, SortOrder::Descending, |row| row.count);
    rows.truncate(DNF_CAUSES_LIMIT);
    rows
}
