//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `link_snapshots.csv`
//! - `vehicle_positions.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LinkSnapshotRow, OutputResult, TickSummaryRow, VehiclePositionRow};

pub const LINK_HEADER: [&str; 8] =
    ["tick", "link_id", "source", "target", "class", "role", "blocked", "distance"];
pub const POSITION_HEADER: [&str; 4] = ["tick", "vehicle_id", "x", "y"];
pub const SUMMARY_HEADER: [&str; 5] =
    ["tick", "links", "active_connections", "blocked_links", "relay_paths"];

/// Writes simulation history to three CSV files.
pub struct CsvWriter {
    links:     Writer<File>,
    positions: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    ///
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut links = Writer::from_path(dir.join("link_snapshots.csv"))?;
        links.write_record(LINK_HEADER)?;

        let mut positions = Writer::from_path(dir.join("vehicle_positions.csv"))?;
        positions.write_record(POSITION_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        log::debug!("csv output in {}", dir.display());
        Ok(Self { links, positions, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_links(&mut self, rows: &[LinkSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.links.write_record(&[
                row.tick.to_string(),
                row.link_id.clone(),
                row.source.clone(),
                row.target.clone(),
                row.class.as_str().to_owned(),
                row.role.as_str().to_owned(),
                (row.blocked as u8).to_string(),
                format!("{:.3}", row.distance),
            ])?;
        }
        Ok(())
    }

    fn write_positions(&mut self, rows: &[VehiclePositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.clone(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.links.to_string(),
            row.active_connections.to_string(),
            row.blocked_links.to_string(),
            row.relay_paths.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.links.flush()?;
        self.positions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
