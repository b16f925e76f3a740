//! Common test utilities and fixtures
#![allow(dead_code)]

use anyhow::Result;
use paddock::model::{CircuitInfo, RaceInfo, ResultRecord};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const RESULTS_CSV: &str = "\
resultId,raceId,driverId,constructorId,grid,position,positionOrder,points,rank,statusId
1,18,1,1,1,1,1,10,2,1
2,18,2,1,3,5,5,4,\\N,1
3,18,3,4,12,4,4,5,\\N,1
4,19,1,1,9,5,5,4,\\N,1
5,19,2,1,8,3,3,6,1,1
6,19,3,4,7,8,8,1,\\N,11
7,20,1,1,18,\\N,20,0,\\N,3
8,20,2,1,12,\\N,19,0,\\N,5
9,20,3,4,10,5,5,4,\\N,1
10,21,1,1,1,1,1,10,1,1
11,21,2,1,2,2,2,8,\\N,1
12,21,3,4,3,\\N,18,0,\\N,5
13,999,3,4,5,6,6,3,\\N,1
";

pub const RACES_CSV: &str = "\
raceId,year,round,circuitId,name,date,time,url
18,2008,1,1,Australian Grand Prix,2008-03-16,04:30:00,\\N
19,2008,2,2,Malaysian Grand Prix,2008-03-23,07:00:00,\\N
20,2009,1,1,Australian Grand Prix,2009-03-29,06:00:00,\\N
21,2009,14,3,Italian Grand Prix,2009-09-13,12:00:00,\\N
";

pub const CIRCUITS_CSV: &str = "\
circuitId,circuitRef,name,location,country,lat,lng,alt,url
1,albert_park,Albert Park Grand Prix Circuit,Melbourne,Australia,-37.8497,144.968,10,\\N
2,sepang,Sepang International Circuit,Kuala Lumpur,Malaysia,2.76083,101.738,18,\\N
3,monza,Autodromo Nazionale di Monza,Monza,Italy,45.6156,9.28111,162,\\N
";

pub const DRIVERS_CSV: &str = "\
driverId,driverRef,number,code,forename,surname,dob,nationality,url
1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British,\\N
2,kovalainen,\\N,KOV,Heikki,Kovalainen,1981-10-19,Finnish,\\N
3,alonso,14,ALO,Fernando,Alonso,1981-07-29,Spanish,\\N
";

pub const CONSTRUCTORS_CSV: &str = "\
constructorId,constructorRef,name,nationality,url
1,mclaren,McLaren,British,\\N
4,renault,Renault,French,\\N
";

pub const STATUS_CSV: &str = "\
statusId,status
1,Finished
3,Accident
5,Engine
11,+1 Lap
";

/// Write the full fixture dump into `dir`
pub fn write_dataset(dir: &Path) -> Result<()> {
    fs::write(dir.join("results.csv"), RESULTS_CSV)?;
    fs::write(dir.join("races.csv"), RACES_CSV)?;
    fs::write(dir.join("circuits.csv"), CIRCUITS_CSV)?;
    fs::write(dir.join("drivers.csv"), DRIVERS_CSV)?;
    fs::write(dir.join("constructors.csv"), CONSTRUCTORS_CSV)?;
    fs::write(dir.join("status.csv"), STATUS_CSV)?;
    Ok(())
}

/// Temporary directory holding the fixture dump
pub fn dataset_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    write_dataset(dir.path())?;
    Ok(dir)
}

/// Builder for hand-made result records
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: ResultRecord,
}

impl RecordBuilder {
    pub fn new(driver_id: u32, race_id: u32) -> Self {
        Self {
            record: ResultRecord::new(driver_id, 1, race_id, 20),
        }
    }

    pub fn constructor(mut self, constructor_id: u32) -> Self {
        self.record.constructor_id = constructor_id;
        self
    }

    /// Classified finish; also sets `position_order`
    pub fn finished(mut self, position: u32) -> Self {
        self.record.position = Some(position);
        self.record.position_order = position;
        self
    }

    pub fn retired(mut self, position_order: u32) -> Self {
        self.record.position = None;
        self.record.position_order = position_order;
        self
    }

    pub fn points(mut self, points: f64) -> Self {
        self.record.points = Some(points);
        self
    }

    pub fn grid(mut self, grid: u32) -> Self {
        self.record.grid = Some(grid);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.record.status = Some(status.to_string());
        self
    }

    pub fn season(mut self, year: i32, round: u32, circuit: &str, country: &str) -> Self {
        self.record.race = Some(RaceInfo {
            race_id: self.record.race_id,
            year,
            round,
            name: Some(format!("{country} Grand Prix")),
            date: None,
            circuit: Some(CircuitInfo {
                name: Some(circuit.to_string()),
                country: Some(country.to_string()),
            }),
        });
        self
    }

    pub fn build(self) -> ResultRecord {
        self.record
    }
}
