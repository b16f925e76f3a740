use serde::{Serialize, Serializer};
use std::fmt;

/// Best classified finish of a group.
///
/// Serializes as the integer position, or as the string `"N/A"` when the
/// group has no classified finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    NoFinish,
    Position(u32),
}

impl Finish {
    pub const NO_FINISH_LABEL: &'static str = "N/A";

    pub fn position(&self) -> Option<u32> {
        match self {
            Finish::NoFinish => None,
            Finish::Position(position) => Some(*position),
        }
    }
}

impl From<Option<u32>> for Finish {
    fn from(position: Option<u32>) -> Self {
        position.map_or(Finish::NoFinish, Finish::Position)
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finish::NoFinish => f.write_str(Self::NO_FINISH_LABEL),
            Finish::Position(position) => write!(f, "{}", position),
        }
    }
}

impl Serialize for Finish {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Finish::NoFinish => serializer.serialize_str(Self::NO_FINISH_LABEL),
            Finish::Position(position) => serializer.serialize_u32(*position),
        }
    }
}

/// First and last season seen in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub first: i32,
    pub last: i32,
}

impl YearSpan {
    /// Fold a sequence of years into a span, `None` when the sequence is empty
    pub fn from_years<I: IntoIterator<Item = i32>>(years: I) -> Option<Self> {
        years.into_iter().fold(None, |span, year| match span {
            None => Some(YearSpan {
                first: year,
                last: year,
            }),
            Some(YearSpan { first, last }) => Some(YearSpan {
                first: first.min(year),
                last: last.max(year),
            }),
        })
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}
