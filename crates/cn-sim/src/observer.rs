//! Simulation observer trait for rendering, logging, and data collection.

use cn_agent::AgentStore;
use cn_core::{AgentId, ClockTime, NodeId};
use cn_graph::{GraphError, Route};
use cn_motion::{Frame, MotionStore};

use crate::DisplaySnapshot;

/// Callbacks invoked by [`Sim`][crate::Sim] as the timeline advances.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  A rendering front end typically
/// implements `on_clock_tick`, `on_phase_change`, and `on_frame`.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, agent: AgentId, time: ClockTime, node: NodeId) {
///         println!("{time} {agent} arrived at node {}", node.0 + 1);
///     }
/// }
/// ```
pub trait SimObserver {
    /// After every clock tick.  `tick` counts ticks since the last reset;
    /// `moving` is the number of agents in motion.
    fn on_clock_tick(&mut self, _tick: u64, _display: &DisplaySnapshot, _moving: usize) {}

    /// The display switched between day and night.
    fn on_phase_change(&mut self, _time: ClockTime, _is_night: bool) {}

    /// `agent` started along `route`.
    fn on_departure(&mut self, _agent: AgentId, _time: ClockTime, _route: &Route) {}

    /// One interpolated animation frame at virtual time `now_ms`.
    fn on_frame(&mut self, _agent: AgentId, _time: ClockTime, _now_ms: u64, _frame: &Frame) {}

    /// `agent` reached `node`.  Called exactly once per completed traversal,
    /// never for a cancelled one.
    fn on_arrival(&mut self, _agent: AgentId, _time: ClockTime, _node: NodeId) {}

    /// The trip `origin → destination` could not be routed; the entry was
    /// abandoned.
    fn on_route_failed(
        &mut self,
        _agent:       AgentId,
        _time:        ClockTime,
        _origin:      NodeId,
        _destination: NodeId,
        _error:       &GraphError,
    ) {}

    /// Every `config.output_interval_ticks` ticks, with read access to all
    /// agent and motion state.
    fn on_snapshot(
        &mut self,
        _tick:   u64,
        _time:   ClockTime,
        _agents: &AgentStore,
        _motion: &MotionStore,
    ) {}

    /// The clock reached `24:00`.  Called once per day.
    fn on_day_end(&mut self, _display: &DisplaySnapshot) {}

    /// The simulation was reset to the start of the day.
    fn on_reset(&mut self, _display: &DisplaySnapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
