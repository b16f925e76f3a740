//! Pairwise comparisons between drivers sharing a race
//!
//! Records of two sides are joined on race id. For a driver-vs-driver
//! comparison every joined pair counts as a shared race; an ahead/behind
//! outcome is only counted when both sides carry the compared value (a
//! classified position, or a valid grid slot).

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{ConstructorId, DriverId, RaceId, ResultRecord};

/// Ahead/behind tally for one compared field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub ahead: usize,
    pub behind: usize,
}

impl Tally {
    /// Record one comparison, lower value being ahead. Skipped unless both
    /// sides are present; equal values count for neither side.
    fn record(self, ours: Option<u32>, theirs: Option<u32>) -> Self {
        match (ours, theirs) {
            (Some(ours), Some(theirs)) => match ours.cmp(&theirs) {
                Ordering::Less => Tally {
                    ahead: self.ahead + 1,
                    ..self
                },
                Ordering::Greater => Tally {
                    behind: self.behind + 1,
                    ..self
                },
                Ordering::Equal => self,
            },
            _ => self,
        }
    }
}

/// Aggregate of all races two sides shared
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairingSummary {
    pub shared_races: usize,
    /// Finishing position comparison from the first side's view
    pub race: Tally,
    /// Starting grid comparison from the first side's view
    pub quali: Tally,
    pub first_points: f64,
    pub second_points: f64,
    pub first_wins: usize,
    pub second_wins: usize,
}

impl PairingSummary {
    fn add(self, ours: &ResultRecord, theirs: &ResultRecord) -> Self {
        PairingSummary {
            shared_races: self.shared_races + 1,
            race: self.race.record(ours.position, theirs.position),
            quali: self.quali.record(ours.valid_grid(), theirs.valid_grid()),
            first_points: self.first_points + ours.points_or_zero(),
            second_points: self.second_points + theirs.points_or_zero(),
            first_wins: self.first_wins + usize::from(ours.is_win()),
            second_wins: self.second_wins + usize::from(theirs.is_win()),
        }
    }
}

/// Join two record sets on race id.
///
/// Pairs are produced in the order of `first`; a race in which one side has
/// several entries yields one pair per combination.
pub fn pair_by_race<'a>(
    first: &'a [ResultRecord],
    second: &'a [ResultRecord],
) -> Vec<(&'a ResultRecord, &'a ResultRecord)> {
    let by_race: HashMap<RaceId, Vec<&ResultRecord>> =
        second.iter().fold(HashMap::new(), |mut acc, record| {
            acc.entry(record.race_id).or_default().push(record);
            acc
        });

    first
        .iter()
        .flat_map(|ours| {
            by_race
                .get(&ours.race_id)
                .into_iter()
                .flatten()
                .map(move |theirs| (ours, *theirs))
        })
        .collect()
}

/// Compare two drivers over the races both took part in
pub fn compare(first: &[ResultRecord], second: &[ResultRecord]) -> PairingSummary {
    summarize(pair_by_race(first, second))
}

/// Fold joined pairs into a summary
pub fn summarize<'a, I>(pairs: I) -> PairingSummary
where
    I: IntoIterator<Item = (&'a ResultRecord, &'a ResultRecord)>,
{
    pairs
        .into_iter()
        .fold(PairingSummary::default(), |summary, (ours, theirs)| {
            summary.add(ours, theirs)
        })
}

/// Season-by-season comparison of a driver against their teammates.
///
/// `pool` holds the results of every constructor the driver raced for; a
/// teammate entry is one with the same race and constructor but a different
/// driver. Entries without a race reference are ignored. Ahead/behind tallies
/// count every pairing, while `shared_races` is the number of distinct races
/// with at least one teammate, so a three-car entry still counts once.
/// Seasons are returned in ascending order.
pub fn teammate_battles(driver_id: DriverId, pool: &[ResultRecord]) -> Vec<(i32, PairingSummary)> {
    let (own, others): (Vec<&ResultRecord>, Vec<&ResultRecord>) = pool
        .iter()
        .filter(|record| record.year().is_some())
        .partition(|record| record.driver_id == driver_id);

    let teammates: HashMap<(RaceId, ConstructorId), Vec<&ResultRecord>> =
        others.into_iter().fold(HashMap::new(), |mut acc, record| {
            acc.entry((record.race_id, record.constructor_id))
                .or_default()
                .push(record);
            acc
        });

    let seasons = own
        .into_iter()
        .flat_map(|ours| {
            teammates
                .get(&(ours.race_id, ours.constructor_id))
                .into_iter()
                .flatten()
                .map(move |theirs| (ours, *theirs))
        })
        .fold(
            BTreeMap::<i32, (PairingSummary, HashSet<RaceId>)>::new(),
            |mut acc, (ours, theirs)| {
                if let Some(year) = ours.year() {
                    let (summary, races) = acc.entry(year).or_default();
                    *summary = summary.add(ours, theirs);
                    races.insert(ours.race_id);
                }
                acc
            },
        );

    seasons
        .into_iter()
        .map(|(year, (summary, races))| {
            (
                year,
                PairingSummary {
                    shared_races: races.len(),
                    ..summary
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RaceInfo;

    fn entry(
        driver_id: u32,
        constructor_id: u32,
        race_id: u32,
        position: Option<u32>,
        grid: Option<u32>,
        points: Option<f64>,
    ) -> ResultRecord {
        let mut record = ResultRecord::new(driver_id, constructor_id, race_id, position.unwrap_or(20));
        record.position = position;
        record.grid = grid;
        record.points = points;
        record.race = Some(RaceInfo {
            race_id,
            year: 2000 + (race_id / 10) as i32,
            round: race_id % 10,
            name: None,
            date: None,
            circuit: None,
        });
        record
    }

    #[test]
    fn test_pairing_counts_shared_races_only() {
        let first = vec![
            entry(1, 1, 10, Some(1), Some(2), Some(10.0)),
            entry(1, 1, 11, Some(4), Some(1), Some(3.0)),
            entry(1, 1, 12, Some(2), Some(3), Some(6.0)),
        ];
        let second = vec![
            entry(2, 2, 10, Some(2), Some(1), Some(6.0)),
            entry(2, 2, 11, Some(3), Some(5), Some(4.0)),
        ];

        let summary = compare(&first, &second);
        assert_eq!(summary.shared_races, 2);
        assert_eq!(summary.race, Tally { ahead: 1, behind: 1 });
        assert_eq!(summary.quali, Tally { ahead: 1, behind: 1 });
        assert_eq!(summary.first_points, 13.0);
        assert_eq!(summary.second_points, 10.0);
        assert_eq!(summary.first_wins, 1);
        assert_eq!(summary.second_wins, 0);
    }

    #[test]
    fn test_missing_values_are_shared_but_not_compared() {
        let first = vec![
            entry(1, 1, 10, None, Some(3), None),
            entry(1, 1, 11, Some(5), Some(0), Some(2.0)),
        ];
        let second = vec![
            entry(2, 2, 10, Some(8), Some(4), None),
            entry(2, 2, 11, Some(9), Some(6), None),
        ];

        let summary = compare(&first, &second);
        assert_eq!(summary.shared_races, 2);
        // Race 10: first side unclassified; race 11: first side has no valid grid
        assert_eq!(summary.race, Tally { ahead: 1, behind: 0 });
        assert_eq!(summary.quali, Tally { ahead: 1, behind: 0 });
        assert_eq!(summary.second_points, 0.0);
    }

    #[test]
    fn test_no_shared_races() {
        let first = vec![entry(1, 1, 10, Some(1), Some(1), Some(10.0))];
        let second = vec![entry(2, 2, 20, Some(1), Some(1), Some(10.0))];
        assert_eq!(compare(&first, &second), PairingSummary::default());
    }

    #[test]
    fn test_teammate_battles_by_season() {
        let pool = vec![
            entry(1, 5, 10, Some(1), Some(1), Some(10.0)),
            entry(2, 5, 10, Some(2), Some(2), Some(8.0)),
            entry(1, 5, 21, Some(6), Some(4), Some(3.0)),
            entry(3, 5, 21, Some(3), Some(2), Some(6.0)),
            // Same race, different constructor: not a teammate
            entry(4, 6, 21, Some(2), Some(3), Some(8.0)),
            entry(1, 5, 22, None, Some(5), None),
            entry(3, 5, 22, Some(7), Some(9), Some(2.0)),
        ];

        let seasons = teammate_battles(1, &pool);
        assert_eq!(seasons.len(), 2);

        let (year, first) = seasons[0];
        assert_eq!(year, 2001);
        assert_eq!(first.shared_races, 1);
        assert_eq!(first.race, Tally { ahead: 1, behind: 0 });

        let (year, second) = seasons[1];
        assert_eq!(year, 2002);
        assert_eq!(second.shared_races, 2);
        assert_eq!(second.race, Tally { ahead: 0, behind: 1 });
        assert_eq!(second.quali, Tally { ahead: 1, behind: 1 });
    }

    #[test]
    fn test_three_car_entry_counts_race_once() {
        let pool = vec![
            entry(1, 6, 10, Some(1), Some(3), Some(10.0)),
            entry(2, 6, 10, Some(2), Some(1), Some(8.0)),
            entry(3, 6, 10, Some(3), Some(2), Some(6.0)),
        ];

        let seasons = teammate_battles(1, &pool);
        assert_eq!(seasons.len(), 1);

        let (year, summary) = seasons[0];
        assert_eq!(year, 2001);
        assert_eq!(summary.shared_races, 1);
        assert_eq!(summary.race, Tally { ahead: 2, behind: 0 });
        assert_eq!(summary.quali, Tally { ahead: 0, behind: 2 });
        assert_eq!(summary.first_points, 20.0);
    }
}
