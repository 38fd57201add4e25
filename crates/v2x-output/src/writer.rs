//! The `OutputWriter` trait implemented by backend writers.

use crate::{LinkSnapshotRow, OutputResult, TickSummaryRow, VehiclePositionRow};

/// A sink for simulation history.
///
/// Errors are returned here but stored by [`SimOutputObserver`] and
/// retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write every link present at one snapshot tick.
    fn write_links(&mut self, rows: &[LinkSnapshotRow]) -> OutputResult<()>;

    /// Write every vehicle position at one snapshot tick.
    fn write_positions(&mut self, rows: &[VehiclePositionRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
