//! Null-safe numeric helpers
//!
//! Every helper here is total: absent values are either skipped or counted as
//! zero, and empty inputs produce `0.0` instead of dividing by zero.

use crate::model::{Finish, ResultRecord};

/// Sum of points with null counted as zero
pub fn sum_points<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    records.into_iter().map(ResultRecord::points_or_zero).sum()
}

/// Mean of `selector` over the records whose selected value passes `valid`.
///
/// Records where the selector yields `None` are skipped. Returns `0.0` when no
/// record qualifies.
pub fn average<'a, I, S, P>(records: I, selector: S, valid: P) -> f64
where
    I: IntoIterator<Item = &'a ResultRecord>,
    S: Fn(&ResultRecord) -> Option<f64>,
    P: Fn(f64) -> bool,
{
    let (total, count) = records
        .into_iter()
        .filter_map(|record| selector(record))
        .filter(|value| valid(*value))
        .fold((0.0, 0usize), |(total, count), value| (total + value, count + 1));

    ratio(total, count)
}

/// Mean starting slot over records with a grid greater than zero
pub fn average_grid<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    average(records, |r| r.grid.map(f64::from), |grid| grid > 0.0)
}

/// Mean finishing position over classified records
pub fn average_finish<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    average(records, |r| r.position.map(f64::from), |_| true)
}

/// Best classified position, or [`Finish::NoFinish`] when there is none
pub fn min_position<'a, I>(records: I) -> Finish
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.position)
        .min()
        .into()
}

/// `numerator / denominator`, or `0.0` for an empty denominator
pub fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Share of `count` in `total` as a percentage, `0.0` for an empty total
pub fn percentage(count: usize, total: usize) -> f64 {
    ratio(100.0 * count as f64, total)
}

/// Decimal precision applied when a metric is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Whole numbers
    Units,
    /// Grid and finish averages
    Tenths,
    /// Point averages and percentages
    Hundredths,
    /// Three decimal places
    Thousandths,
}

impl Precision {
    pub fn decimals(self) -> i32 {
        match self {
            Precision::Units => 0,
            Precision::Tenths => 1,
            Precision::Hundredths => 2,
            Precision::Thousandths => 3,
        }
    }

    /// Round half-up to this precision
    pub fn round(self, value: f64) -> f64 {
        round_half_up(value, self.decimals())
    }
}

/// Round half-up (ties toward positive infinity) to `decimals` places
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: Option<u32>, points: Option<f64>, grid: Option<u32>) -> ResultRecord {
        let mut record = ResultRecord::new(1, 1, 1, position.unwrap_or(20));
        record.position = position;
        record.points = points;
        record.grid = grid;
        record
    }

    #[test]
    fn test_sum_points_treats_null_as_zero() {
        let records = vec![
            record(Some(1), Some(25.0), Some(1)),
            record(None, None, Some(2)),
            record(Some(8), Some(0.5), Some(3)),
        ];
        assert_eq!(sum_points(&records), 25.5);
        assert_eq!(sum_points(&[]), 0.0);
    }

    #[test]
    fn test_average_grid_excludes_zero_and_null() {
        let records = vec![
            record(Some(1), None, Some(1)),
            record(Some(3), None, Some(5)),
            record(None, None, Some(0)),
            record(None, None, None),
            record(None, None, Some(2)),
        ];
        let avg = average_grid(&records);
        assert!((avg - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(Precision::Tenths.round(avg), 2.7);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_grid(&[]), 0.0);
        assert_eq!(average_finish(&[record(None, None, None)]), 0.0);
    }

    #[test]
    fn test_min_position() {
        let records = vec![
            record(Some(4), None, None),
            record(None, None, None),
            record(Some(2), None, None),
        ];
        assert_eq!(min_position(&records), Finish::Position(2));
        assert_eq!(min_position(&records[1..2]), Finish::NoFinish);
    }

    #[test]
    fn test_percentage_guards_division() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.25, 1), 2.3);
        assert_eq!(round_half_up(2.24, 1), 2.2);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(Precision::Hundredths.round(1.0 / 3.0), 0.33);
        assert_eq!(Precision::Thousandths.round(23.4567), 23.457);
        assert_eq!(Precision::Units.round(7.5), 8.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for value in [0.05, 1.15, 2.675, 9.999, 123.456] {
            for precision in [Precision::Tenths, Precision::Hundredths] {
                let once = precision.round(value);
                assert_eq!(precision.round(once), once);
            }
        }
    }
}
