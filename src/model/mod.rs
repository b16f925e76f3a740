//! Result record model
//!
//! One [`ResultRecord`] is one race entry for one driver. Optional source
//! columns are carried as `Option` so every aggregate states its own null
//! policy explicitly.

mod finish;
mod record;

pub use finish::{Finish, YearSpan};
pub use record::{CircuitInfo, ConstructorInfo, DriverInfo, RaceInfo, ResultRecord};

/// Driver identifier
pub type DriverId = u32;
/// Constructor (team) identifier
pub type ConstructorId = u32;
/// Race identifier
pub type RaceId = u32;
