//! The `OutputWriter` trait implemented by recording backends.

use crate::{AlertRow, OutputResult, PositionRow};

/// Sink for recorded rows.
///
/// Errors never reach the tick loop.  The observer stores them and hands
/// them out via [`ProximityOutputObserver::take_error`][crate::ProximityOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick's worth of entity positions.
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()>;

    /// Write one alert.
    fn write_alert(&mut self, row: &AlertRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
