//! `v2x-output` — simulation output for the v2x connectivity engine.
//!
//! | Type                  | Produces                                                         |
//! |-----------------------|------------------------------------------------------------------|
//! | [`CsvWriter`]         | `link_snapshots.csv`, `vehicle_positions.csv`, `tick_summaries.csv` |
//! | [`OcclusionStats`]    | Per-link presence/blocking statistics, optionally `link_stats.csv` |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `v2x_sim::SimObserver`.
//! `OcclusionStats` is an observer in its own right.  Combine both with a
//! tuple: `(SimOutputObserver<_>, OcclusionStats)` is itself an observer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use v2x_output::{CsvWriter, OcclusionStats, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = (SimOutputObserver::new(writer), OcclusionStats::new());
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.0.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{LinkSnapshotRow, TickSummaryRow, VehiclePositionRow};
pub use stats::{LinkStats, OcclusionStats};
pub use writer::OutputWriter;
