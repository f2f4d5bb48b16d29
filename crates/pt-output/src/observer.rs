//! `ProximityOutputObserver<W>` — bridges `ProximityObserver` to an `OutputWriter`.

use pt_core::{Tick, TrackedEntity};
use pt_proximity::{ProximityAlert, ProximityObserver};

use crate::row::{AlertRow, PositionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ProximityObserver`] that records positions and alerts to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error] or [`finish`][Self::finish].
pub struct ProximityOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ProximityOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, surfacing the first stored error before any flush
    /// error.
    pub fn finish(&mut self) -> OutputResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<P, W: OutputWriter> ProximityObserver<P> for ProximityOutputObserver<W> {
    fn on_alert(&mut self, tick: Tick, alert: &ProximityAlert<P>) {
        let row = AlertRow {
            tick:            tick.0,
            entity_id:       alert.entity.id.to_string(),
            distance_m:      alert.distance_m,
            signal_strength: alert.signal_strength,
        };
        let result = self.writer.write_alert(&row);
        self.store_err(result);
    }

    fn on_positions(&mut self, tick: Tick, entities: &[TrackedEntity<P>]) {
        let rows: Vec<PositionRow> = entities
            .iter()
            .filter_map(|e| {
                let at = e.coordinate?;
                Some(PositionRow {
                    tick:      tick.0,
                    entity_id: e.id.to_string(),
                    latitude:  at.lat,
                    longitude: at.lon,
                })
            })
            .collect();
        let result = self.writer.write_positions(&rows);
        self.store_err(result);
    }
}
