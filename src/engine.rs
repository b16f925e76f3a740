//! Statistics engine
//!
//! Fetches one snapshot per request from a [`ResultSource`] and runs a view
//! over it. The engine holds no state of its own beyond the source.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::model::{ConstructorId, DriverId, ResultRecord};
use crate::source::{ResultSource, Scope, Snapshot};
use crate::views::{self, constructor, driver};
use crate::Result;

/// Aggregation engine over a result source
#[derive(Debug, Clone)]
pub struct StatsEngine<S> {
    source: S,
}

impl<S: ResultSource> StatsEngine<S> {
    /// Create a new engine reading from `source`
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn snapshot(&self, scope: Scope) -> Result<Snapshot> {
        let snapshot = self.source.fetch_results(&scope)?;
        if snapshot.is_empty() {
            warn!("No results for {}", scope);
        } else {
            debug!("Fetched {} results for {}", snapshot.len(), scope);
        }
        Ok(snapshot)
    }

    fn finish<T>(view: &str, scope: Scope, rows: Vec<T>) -> Vec<T> {
        info!("Built {} {} rows for {}", rows.len(), view, scope);
        rows
    }

    /// Drivers who raced for a constructor
    pub fn constructor_drivers(&self, id: ConstructorId) -> Result<Vec<constructor::DriverStatsRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("driver", scope, constructor::driver_stats(&snapshot)))
    }

    pub fn constructor_seasons(&self, id: ConstructorId) -> Result<Vec<constructor::SeasonRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("season", scope, constructor::seasons(&snapshot)))
    }

    pub fn constructor_circuits(&self, id: ConstructorId) -> Result<Vec<constructor::CircuitRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("circuit", scope, constructor::circuits(&snapshot)))
    }

    pub fn constructor_geo(&self, id: ConstructorId) -> Result<Vec<constructor::GeoRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("country", scope, constructor::geo_performance(&snapshot)))
    }

    pub fn constructor_dashboard(&self, id: ConstructorId) -> Result<constructor::Dashboard> {
        let snapshot = self.snapshot(Scope::Constructor(id))?;
        Ok(constructor::dashboard(&snapshot))
    }

    pub fn constructor_status(
        &self,
        id: ConstructorId,
    ) -> Result<Vec<constructor::StatusBreakdownRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("status", scope, constructor::status_breakdown(&snapshot)))
    }

    pub fn constructor_heatmap(&self, id: ConstructorId) -> Result<Vec<constructor::HeatmapRow>> {
        let scope = Scope::Constructor(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("race", scope, constructor::points_heatmap(&snapshot)))
    }

    pub fn driver_career(&self, id: DriverId) -> Result<driver::CareerSummary> {
        let snapshot = self.snapshot(Scope::Driver(id))?;
        Ok(driver::career(id, &snapshot))
    }

    pub fn driver_evolution(&self, id: DriverId) -> Result<Vec<driver::EvolutionRow>> {
        let scope = Scope::Driver(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("season", scope, driver::evolution(&snapshot)))
    }

    pub fn driver_circuits(&self, id: DriverId) -> Result<Vec<driver::DriverCircuitRow>> {
        let scope = Scope::Driver(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("circuit", scope, driver::circuits(&snapshot)))
    }

    pub fn driver_status(&self, id: DriverId) -> Result<Vec<driver::StatusCountRow>> {
        let scope = Scope::Driver(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("status", scope, driver::status_counts(&snapshot)))
    }

    pub fn driver_trajectory(&self, id: DriverId) -> Result<Vec<driver::TrajectoryRow>> {
        let scope = Scope::Driver(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("season", scope, driver::trajectory(&snapshot)))
    }

    pub fn driver_positions(&self, id: DriverId) -> Result<Vec<driver::PositionCountRow>> {
        let scope = Scope::Driver(id);
        let snapshot = self.snapshot(scope)?;
        Ok(Self::finish("position", scope, driver::positions(&snapshot)))
    }

    /// Season-by-season teammate battles.
    ///
    /// The comparison pool is every result of every constructor the driver
    /// raced for, so one constructor snapshot is fetched per team.
    pub fn driver_teammates(&self, id: DriverId) -> Result<Vec<driver::TeammateRow>> {
        let scope = Scope::Driver(id);
        let own = self.snapshot(scope)?;

        let mut seen = HashSet::new();
        let constructors: Vec<ConstructorId> = own
            .iter()
            .map(|record| record.constructor_id)
            .filter(|constructor_id| seen.insert(*constructor_id))
            .collect();
        debug!("Driver {} raced for {} constructors", id, constructors.len());

        let pool = constructors
            .into_iter()
            .map(|constructor_id| self.snapshot(Scope::Constructor(constructor_id)))
            .try_fold(Vec::<ResultRecord>::new(), |mut pool, snapshot| {
                pool.extend_from_slice(&snapshot?);
                Ok::<_, crate::Error>(pool)
            })?;

        Ok(Self::finish("season", scope, driver::teammates(id, &pool)))
    }

    /// Two drivers over the races they shared
    pub fn head_to_head(&self, first: DriverId, second: DriverId) -> Result<views::HeadToHeadRow> {
        let first_snapshot = self.snapshot(Scope::Driver(first))?;
        let second_snapshot = self.snapshot(Scope::Driver(second))?;
        let row = views::head_to_head(first, &first_snapshot, second, &second_snapshot);
        info!(
            "Compared drivers {} and {} over {} shared races",
            first, second, row.shared_races
        );
        Ok(row)
    }

    /// Most frequent non-finishing statuses across all results
    pub fn dnf_causes(&self) -> Result<Vec<views::DnfCauseRow>> {
        let snapshot = self.snapshot(Scope::All)?;
        Ok(Self::finish("cause", Scope::All, views::dnf_causes(&snapshot)))
    }
}
