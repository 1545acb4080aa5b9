//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `clock_ticks.csv`
//! - `agent_frames.csv`
//! - `movements.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, FrameRow, MovementRow, OutputResult, TickRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    ticks:     Writer<File>,
    frames:    Writer<File>,
    movements: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (or truncate) the CSV files in `dir` and write the header rows.
    /// `dir` is created if missing.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut ticks = Writer::from_path(dir.join("clock_ticks.csv"))?;
        ticks.write_record(["tick", "time", "is_night", "moving"])?;

        let mut frames = Writer::from_path(dir.join("agent_frames.csv"))?;
        frames.write_record(["agent_id", "time", "ms", "x", "y"])?;

        let mut movements = Writer::from_path(dir.join("movements.csv"))?;
        movements.write_record(["agent_id", "time", "event", "origin", "destination", "weight"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent_id", "tick", "time", "state", "cursor", "x", "y"])?;

        log::info!("writing CSV output to {}", dir.display());
        Ok(Self { ticks, frames, movements, snapshots, finished: false })
    }
}

/// 1-based node label, empty for an unknown node.
fn node_label(node: u32) -> String {
    if node == u32::MAX { String::new() } else { (node + 1).to_string() }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.finished = false;
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            (row.is_night as u8).to_string(),
            row.moving.to_string(),
        ])?;
        Ok(())
    }

    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.finished = false;
        self.frames.write_record(&[
            row.agent_id.to_string(),
            row.time.to_string(),
            row.ms.to_string(),
            row.x.to_string(),
            row.y.to_string(),
        ])?;
        Ok(())
    }

    fn write_movement(&mut self, row: &MovementRow) -> OutputResult<()> {
        self.finished = false;
        self.movements.write_record(&[
            row.agent_id.to_string(),
            row.time.to_string(),
            row.kind.to_string(),
            node_label(row.origin),
            node_label(row.destination),
            opt(row.weight),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.finished = false;
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time.to_string(),
                row.state.to_string(),
                row.cursor.to_string(),
                opt(row.position.map(|p| p.0)),
                opt(row.position.map(|p| p.1)),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.frames.flush()?;
        self.movements.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
