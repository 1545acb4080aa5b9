//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use std::collections::HashMap;

use cn_agent::AgentStore;
use cn_core::{AgentId, ClockTime, NodeId};
use cn_graph::{GraphError, Route};
use cn_motion::{Frame, MotionStore};
use cn_sim::{DisplaySnapshot, SimObserver};

use crate::row::{AgentSnapshotRow, FrameRow, MovementKind, MovementRow, TickRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records ticks, frames, movements and snapshots to
/// any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error] or call [`finish`][Self::finish].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    record_frames: bool,
    /// Origin and weight of each trip in progress, for the arrival row.
    in_flight:     HashMap<AgentId, (NodeId, f64)>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, record_frames: true, in_flight: HashMap::new(), last_error: None }
    }

    /// Skip `agent_frames` rows (ten per route segment) when `false`.
    pub fn record_frames(mut self, enabled: bool) -> Self {
        self.record_frames = enabled;
        self
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer and report the first error seen, if any.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
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

    fn movement(&mut self, row: MovementRow) {
        let result = self.writer.write_movement(&row);
        self.store_err(result);
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_clock_tick(&mut self, tick: u64, display: &DisplaySnapshot, moving: usize) {
        let row = TickRow {
            tick,
            time:     display.time(),
            is_night: display.is_night,
            moving:   moving as u64,
        };
        let result = self.writer.write_tick(&row);
        self.store_err(result);
    }

    fn on_departure(&mut self, agent: AgentId, time: ClockTime, route: &Route) {
        self.in_flight.insert(agent, (route.origin(), route.total_weight));
        self.movement(MovementRow {
            agent_id:    agent.0,
            time,
            kind:        MovementKind::Departure,
            origin:      route.origin().0,
            destination: route.destination().0,
            weight:      Some(route.total_weight),
        });
    }

    fn on_frame(&mut self, agent: AgentId, time: ClockTime, now_ms: u64, frame: &Frame) {
        if !self.record_frames {
            return;
        }
        let row = FrameRow {
            agent_id: agent.0,
            time,
            ms:       now_ms,
            x:        frame.position.x,
            y:        frame.position.y,
        };
        let result = self.writer.write_frame(&row);
        self.store_err(result);
    }

    fn on_arrival(&mut self, agent: AgentId, time: ClockTime, node: NodeId) {
        let (origin, weight) = match self.in_flight.remove(&agent) {
            Some((origin, weight)) => (origin, Some(weight)),
            None => (NodeId::INVALID, None),
        };
        self.movement(MovementRow {
            agent_id:    agent.0,
            time,
            kind:        MovementKind::Arrival,
            origin:      origin.0,
            destination: node.0,
            weight,
        });
    }

    fn on_route_failed(
        &mut self,
        agent:       AgentId,
        time:        ClockTime,
        origin:      NodeId,
        destination: NodeId,
        _error:      &GraphError,
    ) {
        self.movement(MovementRow {
            agent_id:    agent.0,
            time,
            kind:        MovementKind::RouteFailed,
            origin:      origin.0,
            destination: destination.0,
            weight:      None,
        });
    }

    fn on_snapshot(&mut self, tick: u64, time: ClockTime, agents: &AgentStore, motion: &MotionStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|(id, a)| AgentSnapshotRow {
                agent_id: id.0,
                tick,
                time,
                state:    a.state(),
                cursor:   a.cursor(),
                position: motion.position(id).map(|p| (p.x, p.y)),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_day_end(&mut self, _display: &DisplaySnapshot) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn on_reset(&mut self, _display: &DisplaySnapshot) {
        self.in_flight.clear();
    }
}
