//! Timetable types: `TimetableEvent` and `Timetable`.
//!
//! # Ordering
//!
//! Entries keep the order they were given in.  They are *not* sorted by
//! deadline: the source data lists a student's day in sequence, and an agent
//! that misses an entry keeps waiting on it rather than skipping ahead, so
//! order is part of the data.

use cn_core::{ClockTime, NodeId};

use crate::{ScheduleError, ScheduleResult};

// ── TimetableEvent ────────────────────────────────────────────────────────────

/// One scheduled trip: leave `origin` for `destination` at `deadline`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimetableEvent {
    pub deadline:    ClockTime,
    pub origin:      NodeId,
    pub destination: NodeId,
}

impl TimetableEvent {
    pub fn new(deadline: ClockTime, origin: NodeId, destination: NodeId) -> Self {
        Self { deadline, origin, destination }
    }
}

// ── Timetable ─────────────────────────────────────────────────────────────────

/// An agent's ordered list of trips for the day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timetable {
    events: Vec<TimetableEvent>,
}

impl Timetable {
    pub fn new(events: Vec<TimetableEvent>) -> Self {
        Self { events }
    }

    /// A timetable with no entries.  The agent stays `Idle` all day.
    pub fn empty() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: TimetableEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TimetableEvent> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[TimetableEvent] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check every origin and destination against a graph of `node_count`
    /// nodes.  Reports the first offending entry.
    pub fn validate(&self, node_count: usize) -> ScheduleResult<()> {
        for (entry, ev) in self.events.iter().enumerate() {
            for node in [ev.origin, ev.destination] {
                if node.index() >= node_count {
                    return Err(ScheduleError::InvalidNode { entry, node, node_count });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<TimetableEvent> for Timetable {
    fn from_iter<I: IntoIterator<Item = TimetableEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}
