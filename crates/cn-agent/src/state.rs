//! Agent lifecycle state.

use std::fmt;

/// Where an agent is in its timetable cycle.
///
/// ```text
/// Idle ──► WaitingForDeadline ──► Moving ──► WaitingForDeadline (entries left)
///   ▲                                   └──► Idle (timetable exhausted)
///   └── abandoned entry (no path), reset
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Nothing in progress.  Initial state, and terminal once the timetable
    /// is exhausted.
    #[default]
    Idle,
    /// The entry at the cursor is not yet due.
    WaitingForDeadline,
    /// Traversing a route.  At most one traversal at a time.
    Moving,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle               => "idle",
            AgentState::WaitingForDeadline => "waiting",
            AgentState::Moving             => "moving",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
