//! `AgentScheduler` — one agent's timetable cursor, state, and position.

use cn_core::NodeId;
use cn_schedule::{Timetable, TimetableEvent};

use crate::{AgentError, AgentResult, AgentState, Intent, SimContext};

/// Drives one agent through its timetable.
///
/// There is no public "step".  The driver asks [`on_tick`](Self::on_tick)
/// once per clock tick and applies the answer with the transition methods
/// below; each of them checks that the transition is legal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentScheduler {
    timetable:  Timetable,
    /// Index of the next unprocessed entry.
    cursor:     usize,
    state:      AgentState,
    /// Node the agent starts at and returns to on reset.
    start_node: NodeId,
    /// Last node the agent stood at.  While moving, the route origin.
    node:       NodeId,
}

impl AgentScheduler {
    /// An agent that starts at the origin of its first entry, or nowhere
    /// (`NodeId::INVALID`) if the timetable is empty.
    pub fn new(timetable: Timetable) -> Self {
        let start = timetable.get(0).map_or(NodeId::INVALID, |ev| ev.origin);
        Self::with_start(timetable, start)
    }

    pub fn with_start(timetable: Timetable, start_node: NodeId) -> Self {
        Self {
            timetable,
            cursor: 0,
            state: AgentState::Idle,
            start_node,
            node: start_node,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The entry at the cursor, if any remain.
    pub fn current_event(&self) -> Option<&TimetableEvent> {
        self.timetable.get(self.cursor)
    }

    /// `true` once every entry has been processed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.timetable.len()
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state == AgentState::Moving
    }

    // ── Intent phase ──────────────────────────────────────────────────────

    /// Check the entry at the cursor against the clock.
    pub fn on_tick(&self, ctx: &SimContext) -> Intent {
        let Some(ev) = self.current_event() else {
            return Intent::Wait;
        };
        if !ctx.is_due(ev.deadline) {
            return Intent::Wait;
        }
        if self.is_moving() {
            return Intent::Defer;
        }
        Intent::Depart { origin: ev.origin, destination: ev.destination }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Apply [`Intent::Wait`]: an idle agent with entries left starts
    /// waiting.  A moving agent keeps moving.
    pub fn wait(&mut self) {
        if self.state == AgentState::Idle && !self.is_exhausted() {
            self.state = AgentState::WaitingForDeadline;
        }
    }

    /// Start the trip at the cursor.  The agent is placed at the entry's
    /// origin and the cursor advances.
    pub fn begin_moving(&mut self) -> AgentResult<TimetableEvent> {
        self.ensure_free("depart")?;
        let ev = *self.current_event().ok_or(AgentError::TimetableExhausted)?;
        self.cursor += 1;
        self.state = AgentState::Moving;
        self.node = ev.origin;
        Ok(ev)
    }

    /// Drop the entry at the cursor without moving (its route does not
    /// exist).  The cursor advances and the agent is left `Idle`; the next
    /// tick picks up the following entry.
    pub fn abandon_current(&mut self) -> AgentResult<TimetableEvent> {
        self.ensure_free("abandon an entry")?;
        let ev = *self.current_event().ok_or(AgentError::TimetableExhausted)?;
        self.cursor += 1;
        self.state = AgentState::Idle;
        Ok(ev)
    }

    /// Start a trip that is not in the timetable.  The cursor is untouched.
    pub fn begin_unscheduled(&mut self, origin: NodeId) -> AgentResult<()> {
        self.ensure_free("start a trip")?;
        self.state = AgentState::Moving;
        self.node = origin;
        Ok(())
    }

    /// The animation reached `destination`.
    pub fn finish_movement(&mut self, destination: NodeId) -> AgentResult<()> {
        if !self.is_moving() {
            return Err(AgentError::InvalidTransition { action: "finish a trip", state: self.state });
        }
        self.node = destination;
        self.state = if self.is_exhausted() {
            AgentState::Idle
        } else {
            AgentState::WaitingForDeadline
        };
        Ok(())
    }

    /// Back to the start of the day: cursor 0, `Idle`, at the start node.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = AgentState::Idle;
        self.node = self.start_node;
    }

    fn ensure_free(&self, action: &'static str) -> AgentResult<()> {
        if self.is_moving() {
            Err(AgentError::InvalidTransition { action, state: self.state })
        } else {
            Ok(())
        }
    }
}
