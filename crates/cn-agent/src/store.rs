//! `AgentStore` — every agent's scheduler, indexed by `AgentId`.

use cn_core::AgentId;

use crate::{AgentScheduler, AgentState};

/// All agents of one simulation.
///
/// Agents are dense: `AgentId(i)` is `agents[i]`.  Iteration is always in
/// ascending id order, which is the order agents are checked each tick.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    agents: Vec<AgentScheduler>,
}

impl AgentStore {
    pub fn new(agents: Vec<AgentScheduler>) -> Self {
        Self { agents }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.agents.len()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&AgentScheduler> {
        self.agents.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentScheduler> {
        self.agents.get_mut(agent.index())
    }

    /// `(AgentId, &AgentScheduler)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentScheduler)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.agents.len() as u32).map(AgentId)
    }

    /// Number of agents currently in `state`.
    pub fn count_in(&self, state: AgentState) -> usize {
        self.agents.iter().filter(|a| a.state() == state).count()
    }

    /// Reset every agent to the start of the day.
    pub fn reset_all(&mut self) {
        for a in &mut self.agents {
            a.reset();
        }
    }
}
