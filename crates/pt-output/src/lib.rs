//! `pt-output` — recording writers for pawtrack simulation runs.
//!
//! | Backend | Files created                     |
//! |---------|-----------------------------------|
//! | CSV     | `positions.csv`, `alerts.csv`     |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`ProximityOutputObserver`], which implements
//! `pt_proximity::ProximityObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pt_output::{CsvWriter, ProximityOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ProximityOutputObserver::new(writer);
//! engine.run_ticks(100, &mut obs);
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ProximityOutputObserver;
pub use row::{AlertRow, PositionRow};
pub use writer::OutputWriter;
