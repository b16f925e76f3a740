use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ConstructorId, DriverId, RaceId};

/// Circuit a race was held at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInfo {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// Race calendar entry referenced by a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceInfo {
    pub race_id: RaceId,
    pub year: i32,
    pub round: u32,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub circuit: Option<CircuitInfo>,
}

/// Driver identity attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub forename: String,
    pub surname: String,
    pub code: Option<String>,
    pub number: Option<u32>,
    pub nationality: Option<String>,
}

/// Constructor identity attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    pub name: String,
    pub nationality: Option<String>,
}

/// One race entry for one driver.
///
/// `position_order` is always present and totally orders the entries of a
/// race; `position` is `None` for non-classified entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub driver_id: DriverId,
    pub constructor_id: ConstructorId,
    pub race_id: RaceId,
    pub position: Option<u32>,
    pub position_order: u32,
    pub points: Option<f64>,
    pub grid: Option<u32>,
    pub rank: Option<u32>,
    pub status: Option<String>,
    pub race: Option<RaceInfo>,
    pub driver: Option<DriverInfo>,
    pub constructor: Option<ConstructorInfo>,
}

impl ResultRecord {
    /// Bare record with only the identifiers and finishing order set
    pub fn new(
        driver_id: DriverId,
        constructor_id: ConstructorId,
        race_id: RaceId,
        position_order: u32,
    ) -> Self {
        Self {
            driver_id,
            constructor_id,
            race_id,
            position: None,
            position_order,
            points: None,
            grid: None,
            rank: None,
            status: None,
            race: None,
            driver: None,
            constructor: None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.race.as_ref().map(|race| race.year)
    }

    pub fn round(&self) -> Option<u32> {
        self.race.as_ref().map(|race| race.round)
    }

    pub fn race_name(&self) -> Option<&str> {
        self.race.as_ref().and_then(|race| race.name.as_deref())
    }

    pub fn circuit_name(&self) -> Option<&str> {
        self.race
            .as_ref()
            .and_then(|race| race.circuit.as_ref())
            .and_then(|circuit| circuit.name.as_deref())
    }

    pub fn circuit_country(&self) -> Option<&str> {
        self.race
            .as_ref()
            .and_then(|race| race.circuit.as_ref())
            .and_then(|circuit| circuit.country.as_deref())
    }

    pub fn surname(&self) -> Option<&str> {
        self.driver.as_ref().map(|driver| driver.surname.as_str())
    }

    /// Starting slot, with 0 (pit lane or no time set) treated as absent
    pub fn valid_grid(&self) -> Option<u32> {
        self.grid.filter(|grid| *grid > 0)
    }

    /// Points with null counted as zero, for sums only
    pub fn points_or_zero(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }

    /// Non-null and strictly positive points
    pub fn scored_points(&self) -> bool {
        self.points.is_some_and(|points| points > 0.0)
    }

    pub fn is_win(&self) -> bool {
        self.position == Some(1)
    }

    pub fn is_podium(&self) -> bool {
        self.position.is_some_and(|position| position <= 3)
    }

    pub fn is_classified(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_pole(&self) -> bool {
        self.grid == Some(1)
    }

    pub fn is_fastest_lap(&self) -> bool {
        self.rank == Some(1)
    }
}
