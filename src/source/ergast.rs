//! Ergast-format CSV dataset
//!
//! Reads the public dump layout (`results.csv` plus the races, circuits,
//! drivers, constructors and status lookup tables) and joins it into
//! [`ResultRecord`]s once at load time. `\N` marks a null field.

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{InMemorySource, ResultSource, Scope, Snapshot};
use crate::model::{
    CircuitInfo, ConstructorId, ConstructorInfo, DriverId, DriverInfo, RaceId, RaceInfo,
    ResultRecord,
};
use crate::{Error, Result};

const NULL_MARKER: &str = "\\N";

pub const RESULTS_FILE: &str = "results.csv";
pub const RACES_FILE: &str = "races.csv";
pub const CIRCUITS_FILE: &str = "circuits.csv";
pub const DRIVERS_FILE: &str = "drivers.csv";
pub const CONSTRUCTORS_FILE: &str = "constructors.csv";
pub const STATUS_FILE: &str = "status.csv";

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some(NULL_MARKER) => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultRow {
    race_id: RaceId,
    driver_id: DriverId,
    constructor_id: ConstructorId,
    #[serde(default, deserialize_with = "nullable")]
    grid: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    position: Option<u32>,
    position_order: u32,
    #[serde(default, deserialize_with = "nullable")]
    points: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    rank: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    status_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceRow {
    race_id: RaceId,
    year: i32,
    round: u32,
    #[serde(default, deserialize_with = "nullable")]
    circuit_id: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CircuitRow {
    circuit_id: u32,
    #[serde(default, deserialize_with = "nullable")]
    name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriverRow {
    driver_id: DriverId,
    forename: String,
    surname: String,
    #[serde(default, deserialize_with = "nullable")]
    code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    number: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    nationality: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConstructorRow {
    constructor_id: ConstructorId,
    name: String,
    #[serde(default, deserialize_with = "nullable")]
    nationality: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusRow {
    status_id: u32,
    status: String,
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn read_optional_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if path.exists() {
        read_table(path)
    } else {
        debug!("Optional table {} not present", path.display());
        Ok(Vec::new())
    }
}

/// Lookup tables a result row is joined against
#[derive(Debug, Default)]
struct Lookups {
    races: HashMap<RaceId, RaceInfo>,
    drivers: HashMap<DriverId, DriverInfo>,
    constructors: HashMap<ConstructorId, ConstructorInfo>,
    statuses: HashMap<u32, String>,
}

impl Lookups {
    fn load(dir: &Path) -> Result<Self> {
        let circuits: HashMap<u32, CircuitInfo> =
            read_optional_table::<CircuitRow>(&dir.join(CIRCUITS_FILE))?
                .into_iter()
                .map(|row| {
                    (
                        row.circuit_id,
                        CircuitInfo {
                            name: row.name,
                            country: row.country,
                        },
                    )
                })
                .collect();

        let races = read_optional_table::<RaceRow>(&dir.join(RACES_FILE))?
            .into_iter()
            .map(|row| {
                let circuit = row.circuit_id.and_then(|id| circuits.get(&id).cloned());
                (
                    row.race_id,
                    RaceInfo {
                        race_id: row.race_id,
                        year: row.year,
                        round: row.round,
                        name: row.name,
                        date: row.date,
                        circuit,
                    },
                )
            })
            .collect();

        let drivers = read_optional_table::<DriverRow>(&dir.join(DRIVERS_FILE))?
            .into_iter()
            .map(|row| {
                (
                    row.driver_id,
                    DriverInfo {
                        forename: row.forename,
                        surname: row.surname,
                        code: row.code,
                        number: row.number,
                        nationality: row.nationality,
                    },
                )
            })
            .collect();

        let constructors = read_optional_table::<ConstructorRow>(&dir.join(CONSTRUCTORS_FILE))?
            .into_iter()
            .map(|row| {
                (
                    row.constructor_id,
                    ConstructorInfo {
                        name: row.name,
                        nationality: row.nationality,
                    },
                )
            })
            .collect();

        let statuses = read_optional_table::<StatusRow>(&dir.join(STATUS_FILE))?
            .into_iter()
            .map(|row| (row.status_id, row.status))
            .collect();

        Ok(Self {
            races,
            drivers,
            constructors,
            statuses,
        })
    }
}

/// Counters for references the lookup tables could not resolve
#[derive(Debug, Default)]
struct Unresolved {
    races: usize,
    drivers: usize,
}

/// Ergast CSV dump joined into memory
#[derive(Debug, Clone)]
pub struct CsvDataset {
    dir: PathBuf,
    source: InMemorySource,
}

impl CsvDataset {
    /// Load and join every table under `dir`.
    ///
    /// Only `results.csv` is required. A result whose race id is not in
    /// `races.csv` keeps `race = None`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let results_path = dir.join(RESULTS_FILE);
        if !results_path.is_file() {
            return Err(Error::Dataset(format!(
                "{} not found in {}",
                RESULTS_FILE,
                dir.display()
            )));
        }

        let lookups = Lookups::load(dir)?;
        let rows: Vec<ResultRow> = read_table(&results_path)?;

        let (records, unresolved) = rows.into_iter().fold(
            (Vec::new(), Unresolved::default()),
            |(mut records, mut unresolved), row| {
                let record = join(row, &lookups);
                unresolved.races += usize::from(record.race.is_none());
                unresolved.drivers += usize::from(record.driver.is_none());
                records.push(record);
                (records, unresolved)
            },
        );

        if unresolved.races > 0 {
            warn!("{} results reference an unknown race", unresolved.races);
        }
        if unresolved.drivers > 0 {
            warn!("{} results reference an unknown driver", unresolved.drivers);
        }
        info!("Loaded {} results from {}", records.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            source: InMemorySource::new(records),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

fn join(row: ResultRow, lookups: &Lookups) -> ResultRecord {
    ResultRecord {
        driver_id: row.driver_id,
        constructor_id: row.constructor_id,
        race_id: row.race_id,
        position: row.position,
        position_order: row.position_order,
        points: row.points,
        grid: row.grid,
        rank: row.rank,
        status: row
            .status_id
            .and_then(|id| lookups.statuses.get(&id).cloned()),
        race: lookups.races.get(&row.race_id).cloned(),
        driver: lookups.drivers.get(&row.driver_id).cloned(),
        constructor: lookups.constructors.get(&row.constructor_id).cloned(),
    }
}

impl ResultSource for CsvDataset {
    fn fetch_results(&self, scope: &Scope) -> Result<Snapshot> {
        self.source.fetch_results(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn dataset_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            RESULTS_FILE,
            "resultId,raceId,driverId,constructorId,number,grid,position,positionText,positionOrder,points,laps,time,milliseconds,fastestLap,rank,fastestLapTime,fastestLapSpeed,statusId\n\
             1,18,1,1,22,1,1,1,1,10,58,1:34:50.616,5690616,39,2,1:27.452,218.300,1\n\
             2,18,2,2,3,5,\\N,R,2,0,30,\\N,\\N,20,1,1:28.000,210.000,5\n\
             3,999,1,1,22,2,3,3,3,6,58,\\N,\\N,\\N,\\N,\\N,\\N,1\n",
        );
        write(
            dir.path(),
            RACES_FILE,
            "raceId,year,round,circuitId,name,date,time,url\n\
             18,2008,1,1,Australian Grand Prix,2008-03-16,04:30:00,http://x\n",
        );
        write(
            dir.path(),
            CIRCUITS_FILE,
            "circuitId,circuitRef,name,location,country,lat,lng,alt,url\n\
             1,albert_park,Albert Park Grand Prix Circuit,Melbourne,Australia,-37.8497,144.968,10,http://x\n",
        );
        write(
            dir.path(),
            DRIVERS_FILE,
            "driverId,driverRef,number,code,forename,surname,dob,nationality,url\n\
             1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British,http://x\n\
             2,heidfeld,\\N,HEI,Nick,Heidfeld,1977-05-10,German,http://x\n",
        );
        write(
            dir.path(),
            STATUS_FILE,
            "statusId,status\n1,Finished\n5,Engine\n",
        );
        dir
    }

    #[test]
    fn test_load_joins_tables() {
        let dir = dataset_dir();
        let dataset = CsvDataset::load(dir.path()).unwrap();
        assert_eq!(dataset.len(), 3);

        let snapshot = dataset.fetch_results(&Scope::Race(18)).unwrap();
        let winner = &snapshot[0];
        assert_eq!(winner.position, Some(1));
        assert_eq!(winner.points, Some(10.0));
        assert_eq!(winner.rank, Some(2));
        assert_eq!(winner.status.as_deref(), Some("Finished"));
        assert_eq!(winner.year(), Some(2008));
        assert_eq!(
            winner.race.as_ref().and_then(|race| race.date),
            NaiveDate::from_ymd_opt(2008, 3, 16)
        );
        assert_eq!(winner.circuit_name(), Some("Albert Park Grand Prix Circuit"));
        assert_eq!(winner.circuit_country(), Some("Australia"));
        assert_eq!(winner.surname(), Some("Hamilton"));
        assert_eq!(winner.driver.as_ref().and_then(|d| d.number), Some(44));
        assert!(winner.constructor.is_none());
    }

    #[test]
    fn test_null_marker_becomes_none() {
        let dir = dataset_dir();
        let dataset = CsvDataset::load(dir.path()).unwrap();
        let snapshot = dataset.fetch_results(&Scope::Driver(2)).unwrap();
        let retired = &snapshot[0];
        assert_eq!(retired.position, None);
        assert_eq!(retired.position_order, 2);
        assert_eq!(retired.status.as_deref(), Some("Engine"));
        assert_eq!(retired.driver.as_ref().and_then(|d| d.number), None);
    }

    #[test]
    fn test_unknown_race_keeps_record_without_race() {
        let dir = dataset_dir();
        let dataset = CsvDataset::load(dir.path()).unwrap();
        let snapshot = dataset.fetch_results(&Scope::Race(999)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].race.is_none());
        assert_eq!(snapshot[0].rank, None);
    }

    #[test]
    fn test_missing_results_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = CsvDataset::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            RESULTS_FILE,
            "raceId,driverId,constructorId,grid,position,positionOrder,points,rank,statusId\n\
             1,1,1,one,1,1,25,1,1\n",
        );
        let err = CsvDataset::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
