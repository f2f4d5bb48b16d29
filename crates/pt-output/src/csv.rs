//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `positions.csv`
//! - `alerts.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AlertRow, OutputResult, PositionRow};

pub const POSITIONS_FILE: &str = "positions.csv";
pub const ALERTS_FILE: &str = "alerts.csv";

/// Writes a run to two CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    alerts:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (creating `dir` if needed) and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut positions = Writer::from_path(dir.join(POSITIONS_FILE))?;
        positions.write_record(["tick", "entity_id", "latitude", "longitude"])?;

        let mut alerts = Writer::from_path(dir.join(ALERTS_FILE))?;
        alerts.write_record(["tick", "entity_id", "distance_m", "signal_strength"])?;

        Ok(Self {
            positions,
            alerts,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.tick.to_string(),
                row.entity_id.clone(),
                format!("{:.7}", row.latitude),
                format!("{:.7}", row.longitude),
            ])?;
        }
        Ok(())
    }

    fn write_alert(&mut self, row: &AlertRow) -> OutputResult<()> {
        self.alerts.write_record(&[
            row.tick.to_string(),
            row.entity_id.clone(),
            row.distance_m.to_string(),
            row.signal_strength.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.alerts.flush()?;
        Ok(())
    }
}
