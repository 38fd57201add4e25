//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use std::ops::ControlFlow;

use v2x_core::Tick;
use v2x_mobility::Fleet;
use v2x_sim::{SimObserver, TickOutput};

use crate::row::{LinkSnapshotRow, TickSummaryRow, VehiclePositionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries every tick and link/position
/// snapshots at snapshot ticks to any [`OutputWriter`].
///
/// Writer errors are stored rather than stopping the run.  After the run,
/// check with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::error!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, output: &TickOutput) -> ControlFlow<()> {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(output));
        self.store_err(result);
        ControlFlow::Continue(())
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &Fleet, output: &TickOutput) {
        let links: Vec<LinkSnapshotRow> = output
            .links
            .links
            .iter()
            .map(|l| LinkSnapshotRow::from_link(tick.0, l))
            .collect();
        if !links.is_empty() {
            let result = self.writer.write_links(&links);
            self.store_err(result);
        }

        let positions: Vec<VehiclePositionRow> = fleet
            .iter()
            .map(|v| VehiclePositionRow::from_vehicle(tick.0, v))
            .collect();
        if !positions.is_empty() {
            let result = self.writer.write_positions(&positions);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
