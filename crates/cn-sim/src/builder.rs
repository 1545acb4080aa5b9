//! Fluent builder for constructing a [`Sim`].

use cn_agent::AgentStore;
use cn_core::SimConfig;
use cn_graph::{AllPairsRouter, CampusGraph, Router};
use cn_motion::MotionStore;
use cn_schedule::TimerQueue;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start time, tick interval, tolerance, animation timing
/// - [`CampusGraph`]: node positions for animation, node range for validation
/// - `R: Router`: routes built for that same graph
/// - [`AgentStore`]: from [`cn_agent::AgentStoreBuilder`]
///
/// # Example
///
/// ```rust,ignore
/// let agents = AgentStoreBuilder::new().agents(timetables).build();
/// let mut sim = SimBuilder::all_pairs(config, graph, agents).build()?;
/// sim.start();
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router> {
    config: SimConfig,
    graph:  CampusGraph,
    router: R,
    agents: AgentStore,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, graph: CampusGraph, router: R, agents: AgentStore) -> Self {
        Self { config, graph, router, agents }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate inputs, place every agent at its start node, and return a
    /// [`Sim`] that is reset but not started.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] for an invalid [`SimConfig`] or a router built
    ///   for a different node count.
    /// - [`SimError::InvalidTimetable`] if any entry names a node outside the
    ///   graph.
    /// - [`SimError::InvalidNode`] for an explicit start node outside the
    ///   graph.
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let node_count = self.graph.node_count();
        if self.router.node_count() != node_count {
            return Err(SimError::Config(format!(
                "router covers {} nodes but the graph has {node_count}",
                self.router.node_count()
            )));
        }

        let mut motion = MotionStore::new(self.agents.len());
        for (id, agent) in self.agents.iter() {
            agent
                .timetable()
                .validate(node_count)
                .map_err(|source| SimError::InvalidTimetable { agent: id, source })?;

            let start = agent.start_node();
            if start.is_valid() {
                if !self.graph.contains(start) {
                    return Err(SimError::InvalidNode { node: start, node_count });
                }
                motion.place(id, Some(self.graph.position(start)))?;
            }
        }

        let night = self.config.night_policy();
        let start_time = self.config.start_time;
        log::info!(
            "built simulation: {} agents, {node_count} nodes, start {start_time}",
            self.agents.len()
        );

        Ok(Sim {
            clock:    cn_core::SimClock::new(start_time),
            is_night: night.is_night(start_time.hours),
            night,
            config:   self.config,
            graph:    self.graph,
            router:   self.router,
            agents:   self.agents,
            motion,
            timers:   TimerQueue::new(),
            now_ms:   0,
            running:  false,
        })
    }
}

impl SimBuilder<AllPairsRouter> {
    /// Builder with an [`AllPairsRouter`] computed from `graph`.
    pub fn all_pairs(config: SimConfig, graph: CampusGraph, agents: AgentStore) -> Self {
        let router = AllPairsRouter::new(&graph);
        Self::new(config, graph, router, agents)
    }
}
