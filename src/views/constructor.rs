//! Views over a constructor's results

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::{driver_info, year_fields};
use crate::model::{DriverId, Finish, ResultRecord};
use crate::stats::numeric::ratio;
use crate::stats::ranking::{sort_by_key, sort_by_metric, top_n_by, SortOrder, TOP_N};
use crate::stats::{classify, Bucket, Distribution, GroupKey, GroupingStrategy, Precision, StatusCategory};

/// Per-driver totals within one constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStatsRow {
    pub driver_id: DriverId,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub code: Option<String>,
    pub number: Option<u32>,
    pub nationality: Option<String>,
    pub total_points: f64,
    pub wins: usize,
    pub podiums: usize,
    pub races: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<i32>,
    pub years_active: String,
}

/// Drivers of a constructor, most points first
pub fn driver_stats(records: &[ResultRecord]) -> Vec<DriverStatsRow> {
    let rows: Vec<DriverStatsRow> = GroupingStrategy::Driver
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Driver(driver_id) = group.key else {
                return None;
            };
            let metrics = group.metrics();
            let info = driver_info(group.iter());
            let (first_year, last_year, years_active) = year_fields(metrics.years);

            Some(DriverStatsRow {
                driver_id,
                forename: info.map(|d| d.forename.clone()),
                surname: info.map(|d| d.surname.clone()),
                code: info.and_then(|d| d.code.clone()),
                number: info.and_then(|d| d.number),
                nationality: info.and_then(|d| d.nationality.clone()),
                total_points: metrics.total_points,
                wins: metrics.wins,
                podiums: metrics.podiums,
                races: metrics.count,
                first_year,
                last_year,
                years_active,
            })
        })
        .collect();

    debug!("Computed driver stats for {} drivers", rows.len());
    sort_by_metric(rows, SortOrder::Descending, |row| row.total_points)
}

/// One season of a constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRow {
    pub year: i32,
    /// Distinct races entered
    pub races: usize,
    pub points: f64,
    pub wins: usize,
    pub podiums: usize,
    pub best_finish: Finish,
    pub avg_grid: f64,
    pub dnfs: usize,
    /// Points per driver surname, scoring entries only
    pub driver_points: BTreeMap<String, f64>,
}

/// Seasons of a constructor, most recent first
pub fn seasons(records: &[ResultRecord]) -> Vec<SeasonRow> {
    let rows: Vec<SeasonRow> = GroupingStrategy::Year
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Year(year) = group.key else {
                return None;
            };
            let metrics = group.metrics();
            let driver_points = group.iter().filter(|r| r.scored_points()).fold(
                BTreeMap::new(),
                |mut acc: BTreeMap<String, f64>, record| {
                    let name = record
                        .surname()
                        .map(str::to_string)
                        .unwrap_or_else(|| record.driver_id.to_string());
                    *acc.entry(name).or_insert(0.0) += record.points_or_zero();
                    acc
                },
            );

            Some(SeasonRow {
                year,
                races: metrics.races,
                points: metrics.total_points,
                wins: metrics.wins,
                podiums: metrics.podiums,
                best_finish: metrics.best_finish,
                avg_grid: Precision::Tenths.round(metrics.avg_grid),
                dnfs: metrics.dnfs,
                driver_points,
            })
        })
        .collect();

    sort_by_key(rows, SortOrder::Descending, |row| row.year)
}

/// A constructor's record at one circuit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRow {
    pub circuit: String,
    pub country: Option<String>,
    pub races: usize,
    pub wins: usize,
    pub podiums: usize,
    pub total_points: f64,
    pub avg_finish: f64,
    pub best_finish: Finish,
    pub avg_grid: f64,
    pub dnfs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<i32>,
    pub years_active: String,
}

/// Circuits a constructor raced at, most points first
pub fn circuits(records: &[ResultRecord]) -> Vec<CircuitRow> {
    let rows: Vec<CircuitRow> = GroupingStrategy::Circuit
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Circuit(circuit) = group.key.clone() else {
                return None;
            };
            let metrics = group.metrics();
            let country = group
                .iter()
                .find_map(ResultRecord::circuit_country)
                .map(str::to_string);
            let (first_year, last_year, years_active) = year_fields(metrics.years);

            Some(CircuitRow {
                circuit,
                country,
                races: metrics.races,
                wins: metrics.wins,
                podiums: metrics.podiums,
                total_points: metrics.total_points,
                avg_finish: Precision::Tenths.round(metrics.avg_finish),
                best_finish: metrics.best_finish,
                avg_grid: Precision::Tenths.round(metrics.avg_grid),
                dnfs: metrics.dnfs,
                first_year,
                last_year,
                years_active,
            })
        })
        .collect();

    sort_by_metric(rows, SortOrder::Descending, |row| row.total_points)
}

/// A constructor's record in one country
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRow {
    pub country: String,
    /// Points per distinct race
    pub avg_points: f64,
    pub total_points: f64,
    pub races: usize,
    pub wins: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<i32>,
    pub years_active: String,
}

/// The ten countries with the best points-per-race average.
///
/// Ranked on the rounded average, so countries that render the same keep
/// their first-encounter order.
pub fn geo_performance(records: &[ResultRecord]) -> Vec<GeoRow> {
    let rows: Vec<GeoRow> = GroupingStrategy::Country
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let GroupKey::Country(country) = group.key.clone() else {
                return None;
            };
            let metrics = group.metrics();
            let (first_year, last_year, years_active) = year_fields(metrics.years);

            Some(GeoRow {
                country,
                avg_points: Precision::Hundredths.round(ratio(metrics.total_points, metrics.races)),
                total_points: metrics.total_points,
                races: metrics.races,
                wins: metrics.wins,
                first_year,
                last_year,
                years_active,
            })
        })
        .collect();

    top_n_by(rows, TOP_N, |row| row.avg_points)
}

/// Headline numbers for a constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_poles: usize,
    pub total_fastest_laps: usize,
    pub result_distribution: Vec<Bucket>,
}

pub fn dashboard(records: &[ResultRecord]) -> Dashboard {
    let distribution = Distribution::from_records(records);
    debug!(?distribution, "Computed result distribution");

    Dashboard {
        total_poles: records.iter().filter(|r| r.is_pole()).count(),
        total_fastest_laps: records.iter().filter(|r| r.is_fastest_lap()).count(),
        result_distribution: distribution.buckets(),
    }
}

/// Occurrences of one raw status string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdownRow {
    pub status: String,
    pub count: usize,
    pub category: StatusCategory,
}

/// Raw status strings with their category, most frequent first
pub fn status_breakdown(records: &[ResultRecord]) -> Vec<StatusBreakdownRow> {
    let rows: Vec<StatusBreakdownRow> = GroupingStrategy::Status
        .partition(records)
        .into_iter()
        .filter_map(|group| match &group.key {
            GroupKey::Status(status) => Some(StatusBreakdownRow {
                category: classify(status),
                status: status.clone(),
                count: group.len(),
            }),
            _ => None,
        })
        .collect();

    sort_by_key(rows, SortOrder::Descending, |row| row.count)
}

/// Points scored in one race, for calendar heatmaps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    pub year: i32,
    pub round: u32,
    pub race_name: Option<String>,
    pub points: f64,
    /// Best finishing order of the constructor's entries
    pub best_pos: u32,
}

/// Fallback `bestPos` when a race has no entries
const NO_POSITION: u32 = 99;

/// Points per race in calendar order
pub fn points_heatmap(records: &[ResultRecord]) -> Vec<HeatmapRow> {
    let rows: Vec<HeatmapRow> = GroupingStrategy::Race
        .partition(records)
        .into_iter()
        .filter_map(|group| {
            let race = group.iter().find_map(|r| r.race.as_ref())?;
            Some(HeatmapRow {
                year: race.year,
                round: race.round,
                race_name: race.name.clone(),
                points: group.metrics().total_points,
                best_pos: group
                    .iter()
                    .map(|r| r.position_order)
                    .min()
                    .unwrap_or(NO_POSITION),
            })
        })
        .collect();

    sort_by_key(rows, SortOrder::Ascending, |row| (row.year, row.round))
}
