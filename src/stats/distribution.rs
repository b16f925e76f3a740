//! Mutually exclusive result distribution
//!
//! Splits a snapshot into wins, non-winning podiums, points finishes outside
//! the podium, DNFs and the remainder (finished out of the points). Wins and
//! podiums here are decided by `position_order`, not by `position`.

use serde::Serialize;

use crate::model::ResultRecord;

/// One non-empty bucket of a distribution, ready for charting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

/// Bucket counts over one snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub count: usize,
    pub wins: usize,
    pub podiums: usize,
    pub points: usize,
    pub dnfs: usize,
    pub other: usize,
}

impl Distribution {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ResultRecord>,
    {
        let tally = records
            .into_iter()
            .fold(Distribution::default(), |mut tally, record| {
                tally.count += 1;
                let order = record.position_order;
                if order == 1 {
                    tally.wins += 1;
                }
                if order > 1 && order <= 3 {
                    tally.podiums += 1;
                }
                if order > 3 && record.scored_points() {
                    tally.points += 1;
                }
                if record.position.is_none() {
                    tally.dnfs += 1;
                }
                tally
            });

        // Buckets can overlap on inconsistent data (an unclassified entry with
        // a podium position_order), so the remainder is floored at zero.
        let assigned = tally.wins + tally.podiums + tally.points + tally.dnfs;
        Distribution {
            other: tally.count.saturating_sub(assigned),
            ..tally
        }
    }

    /// Non-empty buckets in display order
    pub fn buckets(&self) -> Vec<Bucket> {
        [
            ("Wins", self.wins, "#FFD700"),
            ("Podiums", self.podiums, "#C0C0C0"),
            ("Points", self.points, "#E10600"),
            ("No Points", self.other, "#333333"),
            ("DNF", self.dnfs, "#151515"),
        ]
        .into_iter()
        .filter(|(_, value, _)| *value > 0)
        .map(|(name, value, color)| Bucket { name, value, color })
        .collect()
    }
}
