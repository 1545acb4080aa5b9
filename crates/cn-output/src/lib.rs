//! `cn-output` — simulation output writers for the `rust_campus` simulator.
//!
//! [`CsvWriter`] creates four files in the configured output directory:
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `clock_ticks.csv`     | clock tick (time, day/night, agents moving)   |
//! | `agent_frames.csv`    | animation frame (agent position)              |
//! | `movements.csv`       | departure, arrival or abandoned trip          |
//! | `agent_snapshots.csv` | agent, every `output_interval_ticks` ticks    |
//!
//! Node labels in the files are 1-based, matching the input CSVs.
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, FrameRow, MovementKind, MovementRow, TickRow};
pub use writer::OutputWriter;
