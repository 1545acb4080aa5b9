//! Plain data row types written by output backends.

use std::fmt;

use cn_agent::AgentState;
use cn_core::ClockTime;

/// One clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRow {
    pub tick:     u64,
    pub time:     ClockTime,
    pub is_night: bool,
    /// Agents with an active animation after the tick.
    pub moving:   u64,
}

/// One interpolated animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub agent_id: u32,
    pub time:     ClockTime,
    /// Virtual milliseconds since the last reset.
    pub ms:       u64,
    pub x:        f32,
    pub y:        f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Departure,
    Arrival,
    RouteFailed,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Departure   => "departure",
            MovementKind::Arrival     => "arrival",
            MovementKind::RouteFailed => "route_failed",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A departure, arrival, or abandoned timetable entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementRow {
    pub agent_id:    u32,
    pub time:        ClockTime,
    pub kind:        MovementKind,
    /// Node index (0-based).  `u32::MAX` when unknown, e.g. an arrival
    /// whose departure was not observed.
    pub origin:      u32,
    pub destination: u32,
    /// Route weight; `None` for a failed route.
    pub weight:      Option<f64>,
}

/// One agent's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub time:     ClockTime,
    pub state:    AgentState,
    pub cursor:   usize,
    /// `None` for an agent that was never placed on the map.
    pub position: Option<(f32, f32)>,
}
