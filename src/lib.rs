//! # Paddock
//!
//! Aggregates historical motor-racing results into driver, constructor,
//! season, circuit and country summaries.
//!
//! ## Usage
//!
//! ```bash
//! paddock --data-dir ./data constructor 6 seasons
//! paddock driver 1 career --format markdown
//! paddock head-to-head 1 3
//! ```
//!
//! ## Modules
//!
//! - `model` - Result records and the `Finish`/`YearSpan` value types
//! - `stats` - Pure aggregation: numeric helpers, status classification, grouping, distributions, pairing and ranking
//! - `views` - One function per aggregation view, returning serializable rows
//! - `source` - The `ResultSource` seam, snapshots, the Ergast CSV dataset and the snapshot cache
//! - `engine` - `StatsEngine`, which fetches a snapshot and runs a view over it
//! - `output` - JSON, Markdown, CSV and text rendering
//! - `config` - Layered TOML and environment configuration
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod source;
pub mod stats;
pub mod views;

pub use engine::StatsEngine;
pub use error::{Error, Result};
