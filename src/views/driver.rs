//! Views over a single driver's results

use serde::Serialize;
use std::collections::BTreeMap;

use super::{driver_info, year_fields};
use crate::model::{ConstructorId, DriverId, Finish, ResultRecord};
use crate::stats::head_to_head::teammate_battles;
use crate::stats::numeric::{percentage, ratio};
use crate::stats::ranking::{sort_by_key, sort_by_metric, SortOrder};
use crate::stats::{
    classify, group_by, GroupKey, GroupMetrics, GroupingStrategy, Precision, StatusCategory,
};

/// Minimum classified finishes at a circuit for it to be reported
const MIN_CIRCUIT_FINISHES: usize = 2;

/// A stint with one constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStint {
    pub constructor_id: ConstructorId,
    pub name: Option<String>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub races: usize,
    pub points: f64,
    pub wins: usize,
}

/// Career totals of one driver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub driver_id: DriverId,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub code: Option<String>,
    pub nationality: Option<String>,
    pub races: usize,
    pub total_points: f64,
    pub wins: usize,
    pub podiums: usize,
    pub poles: usize,
    pub fastest_laps: usize,
    pub best_finish: Finish,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<i32>,
    pub years_active: String,
    pub win_rate: f64,
    pub podium_rate: f64,
    pub points_rate: f64,
    /// Share of entries whose status is not a finish
    pub dnf_rate: f64,
    pub teams: Vec<TeamStint>,
}

fn is_retirement(record: &ResultRecord) -> bool {
    record
        .status
        .as_deref()
        .is_some_and(|status| classify(status) != StatusCategory::Finished)
}

pub fn career(driver_id: DriverId, records: &[ResultRecord]) -> CareerSummary {
    let metrics = GroupMetrics::from_snapshot(records);
    let info = driver_info(records);
    let (first_year, last_year, years_active) = year_fields(metrics.years);
    let retirements = records.iter().filter(|r| is_retirement(r)).count();

    let teams: Vec<TeamStint> = GroupingStrategy::Constructor
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Constructor(constructor_id) = group.key else {
                return None;
            };
            let stint = group.metrics();
            Some(TeamStint {
                constructor_id,
                name: group
                    .iter()
                    .find_map(|r| r.constructor.as_ref())
                    .map(|c| c.name.clone()),
                from_year: stint.years.map(|span| span.first),
                to_year: stint.years.map(|span| span.last),
                races: stint.count,
                points: stint.total_points,
                wins: stint.wins,
            })
        })
        .collect();

    CareerSummary {
        driver_id,
        forename: info.map(|d| d.forename.clone()),
        surname: info.map(|d| d.surname.clone()),
        code: info.and_then(|d| d.code.clone()),
        nationality: info.and_then(|d| d.nationality.clone()),
        races: metrics.count,
        total_points: metrics.total_points,
        wins: metrics.wins,
        podiums: metrics.podiums,
        poles: metrics.poles,
        fastest_laps: metrics.fastest_laps,
        best_finish: metrics.best_finish,
        first_year,
        last_year,
        years_active,
        win_rate: Precision::Hundredths.round(percentage(metrics.wins, metrics.count)),
        podium_rate: Precision::Hundredths.round(percentage(metrics.podiums, metrics.count)),
        points_rate: Precision::Hundredths
            .round(percentage(metrics.points_finishes, metrics.count)),
        dnf_rate: Precision::Hundredths.round(percentage(retirements, metrics.count)),
        teams: sort_by_key(teams, SortOrder::Descending, |team| team.from_year),
    }
}

/// Form of one season
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionRow {
    pub year: i32,
    pub avg_grid: f64,
    pub avg_finish: f64,
    pub total_points: f64,
    pub points_per_race: f64,
    /// Entries finishing ahead of their starting slot
    pub positions_gained: usize,
}

/// Season-by-season form, oldest first
pub fn evolution(records: &[ResultRecord]) -> Vec<EvolutionRow> {
    let rows: Vec<EvolutionRow> = GroupingStrategy::Year
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Year(year) = group.key else {
                return None;
            };
            let metrics = group.metrics();
            let positions_gained = group
                .iter()
                .filter(|r| matches!((r.position, r.valid_grid()), (Some(p), Some(g)) if p < g))
                .count();

            Some(EvolutionRow {
                year,
                avg_grid: Precision::Tenths.round(metrics.avg_grid),
                avg_finish: Precision::Tenths.round(metrics.avg_finish),
                total_points: metrics.total_points,
                points_per_race: Precision::Hundredths
                    .round(ratio(metrics.total_points, metrics.count)),
                positions_gained,
            })
        })
        .collect();

    sort_by_key(rows, SortOrder::Ascending, |row| row.year)
}

/// A driver's record at one circuit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCircuitRow {
    pub circuit: String,
    pub country: Option<String>,
    pub races: usize,
    pub avg_finish: f64,
    pub wins: usize,
    pub podiums: usize,
    pub total_points: f64,
}

/// Circuits with at least two classified finishes, best average first
pub fn circuits(records: &[ResultRecord]) -> Vec<DriverCircuitRow> {
    let by_circuit = group_by(records, |r| {
        r.circuit_name()
            .filter(|_| r.is_classified())
            .map(str::to_string)
    });

    let ranked: Vec<(f64, DriverCircuitRow)> = by_circuit
        .into_iter()
        .filter(|group| group.len() >= MIN_CIRCUIT_FINISHES)
        .map(|group| {
            let metrics = group.metrics();
            (
                metrics.avg_finish,
                DriverCircuitRow {
                    circuit: group.key.clone(),
                    country: group
                        .iter()
                        .find_map(ResultRecord::circuit_country)
                        .map(str::to_string),
                    races: metrics.count,
                    avg_finish: Precision::Tenths.round(metrics.avg_finish),
                    wins: metrics.wins,
                    podiums: metrics.podiums,
                    total_points: metrics.total_points,
                },
            )
        })
        .collect();

    sort_by_metric(ranked, SortOrder::Ascending, |(avg_finish, _)| *avg_finish)
        .into_iter()
        .map(|(_, row)| row)
        .collect()
}

/// Entries per outcome category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCountRow {
    pub status: StatusCategory,
    pub count: usize,
}

/// Outcome categories, most frequent first
pub fn status_counts(records: &[ResultRecord]) -> Vec<StatusCountRow> {
    let rows: Vec<StatusCountRow> = group_by(records, |r| r.status.as_deref().map(classify))
        .into_iter()
        .map(|group| StatusCountRow {
            count: group.len(),
            status: group.key,
        })
        .collect();

    sort_by_key(rows, SortOrder::Descending, |row| row.count)
}

/// Season and running career totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryRow {
    pub year: i32,
    /// Last round the driver entered that season
    pub round: Option<u32>,
    pub season_points: f64,
    pub cumulative_points: f64,
    pub season_races: usize,
    pub cumulative_races: usize,
}

/// Cumulative points and races, oldest season first
pub fn trajectory(records: &[ResultRecord]) -> Vec<TrajectoryRow> {
    let seasons = sort_by_key(
        GroupingStrategy::Year.partition(records),
        SortOrder::Ascending,
        |group| match group.key {
            GroupKey::Year(year) => year,
            _ => i32::MIN,
        },
    );

    seasons
        .into_iter()
        .filter_map(|group| match group.key {
            GroupKey::Year(year) => Some((
                year,
                group.iter().filter_map(ResultRecord::round).max(),
                group.metrics(),
            )),
            _ => None,
        })
        .scan((0.0, 0usize), |(points, races), (year, round, metrics)| {
            *points += metrics.total_points;
            *races += metrics.count;
            Some(TrajectoryRow {
                year,
                round,
                season_points: metrics.total_points,
                cumulative_points: *points,
                season_races: metrics.count,
                cumulative_races: *races,
            })
        })
        .collect()
}

/// Occurrences of one finishing position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCountRow {
    pub position: u32,
    pub count: usize,
}

/// Histogram of classified finishing positions
pub fn positions(records: &[ResultRecord]) -> Vec<PositionCountRow> {
    records
        .iter()
        .filter_map(|r| r.position)
        .fold(BTreeMap::<u32, usize>::new(), |mut acc, position| {
            *acc.entry(position).or_insert(0) += 1;
            acc
        })
        .into_iter()
        .map(|(position, count)| PositionCountRow { position, count })
        .collect()
}

/// Teammate comparison for one season
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeammateRow {
    pub year: i32,
    pub races_with_teammate: usize,
    pub race_ahead: usize,
    pub race_behind: usize,
    pub quali_ahead: usize,
    pub quali_behind: usize,
}

/// Season-by-season teammate battles.
///
/// `pool` holds every result of the constructors the driver raced for.
pub fn teammates(driver_id: DriverId, pool: &[ResultRecord]) -> Vec<TeammateRow> {
    teammate_battles(driver_id, pool)
        .into_iter()
        .map(|(year, summary)| TeammateRow {
            year,
            races_with_teammate: summary.shared_races,
            race_ahead: summary.race.ahead,
            race_behind: summary.race.behind,
            quali_ahead: summary.quali.ahead,
            quali_behind: summary.quali.behind,
        })
        .collect()
}
