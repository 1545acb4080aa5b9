//! Fluent builder for `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use cn_agent::AgentStoreBuilder;
//! use cn_core::{ClockTime, NodeId};
//! use cn_schedule::{Timetable, TimetableEvent};
//!
//! let lecture = TimetableEvent::new(ClockTime::new(8, 20).unwrap(), NodeId(0), NodeId(4));
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(Timetable::new(vec![lecture]))
//!     .agent_at(Timetable::empty(), NodeId(2))
//!     .build();
//!
//! assert_eq!(store.len(), 2);
//! ```

use cn_core::NodeId;
use cn_schedule::Timetable;

use crate::{AgentScheduler, AgentStore};

/// Builder for [`AgentStore`].  Agents get ids in the order they are added.
#[derive(Default)]
pub struct AgentStoreBuilder {
    agents: Vec<AgentScheduler>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent that starts at the origin of its first entry.
    pub fn agent(mut self, timetable: Timetable) -> Self {
        self.agents.push(AgentScheduler::new(timetable));
        self
    }

    /// Add an agent with an explicit start node.
    pub fn agent_at(mut self, timetable: Timetable, start: NodeId) -> Self {
        self.agents.push(AgentScheduler::with_start(timetable, start));
        self
    }

    /// Add one agent per timetable (e.g. straight from the CSV loader).
    pub fn agents(mut self, timetables: impl IntoIterator<Item = Timetable>) -> Self {
        self.agents.extend(timetables.into_iter().map(AgentScheduler::new));
        self
    }

    pub fn build(self) -> AgentStore {
        AgentStore::new(self.agents)
    }
}
