//! CSV timetable loader.
//!
//! # CSV format
//!
//! One row per trip.  Rows for the same agent are kept in file order, which
//! is the order the agent works through them.
//!
//! ```csv
//! agent_id,departure,origin,destination
//! 0,08:20,1,5
//! 0,10:05,5,9
//! 1,08:20,2,5
//! ```
//!
//! `departure` is `HH:MM`.  `origin` and `destination` use the 1-based node
//! labels of the campus data (the same labels as the weight matrix header)
//! and are converted to 0-based `NodeId`s here; `0` is rejected.
//!
//! Agents absent from the CSV receive an empty `Timetable`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cn_core::{ClockTime, NodeId};

use crate::{ScheduleError, ScheduleResult, Timetable, TimetableEvent};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TimetableRecord {
    agent_id:    u32,
    departure:   String,
    origin:      u32,
    destination: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-agent timetables from a CSV file.
///
/// With `agent_count = Some(n)` the result has length `n` and rows for
/// agents `>= n` are an error.  With `None` the length is one more than the
/// highest `agent_id` in the file.
pub fn load_timetables_csv(path: &Path, agent_count: Option<usize>) -> ScheduleResult<Vec<Timetable>> {
    let file = std::fs::File::open(path)?;
    let timetables = load_timetables_reader(file, agent_count)?;
    log::info!(
        "loaded {} timetables ({} trips) from {}",
        timetables.len(),
        timetables.iter().map(Timetable::len).sum::<usize>(),
        path.display()
    );
    Ok(timetables)
}

/// Like [`load_timetables_csv`] but accepts any `Read` source.
pub fn load_timetables_reader<R: Read>(
    reader: R,
    agent_count: Option<usize>,
) -> ScheduleResult<Vec<Timetable>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut timetables: Vec<Timetable> = vec![Timetable::empty(); agent_count.unwrap_or(0)];

    for (row, result) in csv_reader.deserialize::<TimetableRecord>().enumerate() {
        let rec = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let agent = rec.agent_id as usize;

        match agent_count {
            Some(n) if agent >= n => {
                return Err(ScheduleError::Parse(format!(
                    "row {}: agent_id {agent} outside 0..{n}",
                    row + 1
                )));
            }
            Some(_) => {}
            None if agent >= timetables.len() => timetables.resize(agent + 1, Timetable::empty()),
            None => {}
        }

        let deadline: ClockTime = rec
            .departure
            .parse()
            .map_err(|e| ScheduleError::Parse(format!("row {}: {e}", row + 1)))?;
        let event = TimetableEvent {
            deadline,
            origin:      node_from_label(rec.origin, row)?,
            destination: node_from_label(rec.destination, row)?,
        };
        timetables[agent].push(event);
    }

    Ok(timetables)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn node_from_label(label: u32, row: usize) -> ScheduleResult<NodeId> {
    match label.checked_sub(1) {
        Some(idx) => Ok(NodeId(idx)),
        None => Err(ScheduleError::Parse(format!(
            "row {}: node labels start at 1, got 0",
            row + 1
        ))),
    }
}
