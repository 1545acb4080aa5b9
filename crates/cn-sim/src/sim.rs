//! The `Sim` struct and its timeline.

use cn_agent::{AgentStore, Intent, SimContext};
use cn_core::{AgentId, ClockTick, ClockTime, NightPolicy, NodeId, SimClock, SimConfig};
use cn_graph::{CampusGraph, GraphError, Route, Router};
use cn_motion::{MotionEvent, MotionStore};
use cn_schedule::TimerQueue;

use crate::{DisplaySnapshot, SimError, SimObserver, SimResult};

/// The campus simulation: clock, agents, animations, and their timers.
///
/// All mutable state lives here and is changed only by the driver methods
/// ([`step`](Self::step), [`advance_to`](Self::advance_to),
/// [`reset`](Self::reset), ...).  Components receive read-only snapshots.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    pub(crate) config:   SimConfig,
    pub(crate) night:    NightPolicy,
    pub(crate) clock:    SimClock,
    pub(crate) graph:    CampusGraph,
    pub(crate) router:   R,
    pub(crate) agents:   AgentStore,
    pub(crate) motion:   MotionStore,
    pub(crate) timers:   TimerQueue,
    /// Virtual milliseconds since the last reset.
    pub(crate) now_ms:   u64,
    pub(crate) running:  bool,
    pub(crate) is_night: bool,
}

impl<R: Router> Sim<R> {
    // ── Control surface ───────────────────────────────────────────────────

    /// Let the timeline run.  Idempotent.
    pub fn start(&mut self) {
        if !self.running {
            log::info!("simulation started at {} with {} agents", self.clock, self.agents.len());
        }
        self.running = true;
    }

    /// Return to the start of the day at `start_time`.
    ///
    /// Every cursor goes back to 0, every agent to `Idle` at its start node,
    /// every animation is dropped and every pending timer unregistered, so
    /// no frame or arrival from before the reset can fire.  A running
    /// simulation keeps ticking from `start_time`, including after the end
    /// of the day.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidTime`] if `start_time` is not a time of day
    /// (`00:00 ..= 24:00`); nothing is changed in that case.
    pub fn reset<O: SimObserver>(&mut self, start_time: ClockTime, observer: &mut O) -> SimResult<()> {
        let start_time = ClockTime::new(start_time.hours, start_time.minutes)?;

        let cancelled = self.motion.cancel_all();
        self.timers.clear();
        self.clock.reset(start_time);
        self.agents.reset_all();
        for (id, agent) in self.agents.iter() {
            let pos = self.graph.contains(agent.node()).then(|| self.graph.position(agent.node()));
            let placed = self.motion.place(id, pos);
            debug_assert!(placed.is_ok(), "store ids cover the motion store");
        }
        self.now_ms = 0;
        self.is_night = self.night.is_night(start_time.hours);

        log::info!("simulation reset to {start_time} ({cancelled} animations cancelled)");
        observer.on_reset(&self.display());
        Ok(())
    }

    /// Shortest route between two nodes.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidNode`] for an id outside the graph (checked before
    /// the router is consulted), [`SimError::Graph`] with
    /// [`GraphError::NoPath`] for a disconnected pair.
    pub fn request_route(&self, origin: NodeId, destination: NodeId) -> SimResult<Route> {
        for node in [origin, destination] {
            if !self.graph.contains(node) {
                return Err(SimError::InvalidNode { node, node_count: self.graph.node_count() });
            }
        }
        Ok(self.router.route(origin, destination)?)
    }

    /// Route `agent` from `origin` to `destination` outside its timetable and
    /// animate the trip.  Completion is reported through
    /// [`SimObserver::on_arrival`].
    ///
    /// # Errors
    ///
    /// [`SimError::AgentBusy`] while the agent is moving,
    /// [`SimError::DayEnded`] after `24:00`, plus the errors of
    /// [`request_route`](Self::request_route).
    pub fn animate_route<O: SimObserver>(
        &mut self,
        agent:       AgentId,
        origin:      NodeId,
        destination: NodeId,
        observer:    &mut O,
    ) -> SimResult<Route> {
        let sched = self.agents.get(agent).ok_or(SimError::AgentNotFound(agent))?;
        if sched.is_moving() {
            return Err(SimError::AgentBusy(agent));
        }
        if self.clock.day_ended() {
            return Err(SimError::DayEnded);
        }
        let route = self.request_route(origin, destination)?;

        self.agents
            .get_mut(agent)
            .ok_or(SimError::AgentNotFound(agent))?
            .begin_unscheduled(origin)?;
        observer.on_departure(agent, self.clock.time(), &route);
        self.launch(agent, route.clone(), observer)?;
        Ok(route)
    }

    // ── Driving the timeline ──────────────────────────────────────────────

    /// Advance to the next tick boundary: fire due animation timers, tick
    /// the clock, check every agent.
    ///
    /// After the end of day this is a no-op returning `advanced = false`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<ClockTick> {
        if !self.running {
            return Err(SimError::NotRunning);
        }
        if self.clock.day_ended() {
            return Ok(ClockTick { time: self.clock.time(), day_ended: true, advanced: false });
        }
        let boundary = self.next_tick_ms();
        self.fire_timers(boundary, observer)?;
        self.now_ms = boundary;
        self.tick(observer)
    }

    /// Run exactly `n` ticks (fewer if the day ends first).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if !self.step(observer)?.advanced {
                break;
            }
        }
        Ok(())
    }

    /// Run until the day ends.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.clock.day_ended() {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process everything scheduled up to virtual time `target_ms`: timers
    /// and tick boundaries interleaved in time order.
    ///
    /// Used by real-time drivers that sleep until
    /// [`next_event_ms`](Self::next_event_ms) and then catch up.
    pub fn advance_to<O: SimObserver>(&mut self, target_ms: u64, observer: &mut O) -> SimResult<()> {
        if !self.running {
            return Err(SimError::NotRunning);
        }
        while !self.clock.day_ended() {
            let boundary = self.next_tick_ms();
            if boundary > target_ms {
                self.fire_timers(target_ms, observer)?;
                self.now_ms = self.now_ms.max(target_ms);
                break;
            }
            self.step(observer)?;
        }
        Ok(())
    }

    /// Virtual time of the next thing that will happen (a frame or a tick),
    /// or `None` once the day has ended.
    pub fn next_event_ms(&self) -> Option<u64> {
        if self.clock.day_ended() {
            return None;
        }
        let tick = self.next_tick_ms();
        Some(self.timers.next_due().map_or(tick, |due| due.min(tick)))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Current time and day/night flag.
    pub fn display(&self) -> DisplaySnapshot {
        DisplaySnapshot::from_clock(&self.clock, &self.night)
    }

    pub fn time(&self) -> ClockTime {
        self.clock.time()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &CampusGraph {
        &self.graph
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn motion(&self) -> &MotionStore {
        &self.motion
    }

    /// Number of registered animation timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn next_tick_ms(&self) -> u64 {
        (self.clock.ticks() + 1) * self.config.tick_interval_ms
    }

    /// Pop and fire every timer due at or before `until_ms`.
    fn fire_timers<O: SimObserver>(&mut self, until_ms: u64, observer: &mut O) -> SimResult<()> {
        while let Some((due, agent)) = self.timers.pop_due(until_ms) {
            self.now_ms = due;
            let time = self.clock.time();
            match self.motion.advance(agent) {
                Some(MotionEvent::Frame { frame, next_due_ms }) => {
                    self.timers.push(next_due_ms, agent);
                    observer.on_frame(agent, time, due, &frame);
                }
                Some(MotionEvent::Arrived { frame, route }) => {
                    observer.on_frame(agent, time, due, &frame);
                    self.arrive(agent, route.destination(), observer)?;
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Apply one clock tick and the agent checks that follow it.
    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<ClockTick> {
        let tick = self.clock.tick();
        let display = self.display();

        if display.is_night != self.is_night {
            self.is_night = display.is_night;
            log::debug!("{} switched to {}", tick.time, if display.is_night { "night" } else { "day" });
            observer.on_phase_change(tick.time, display.is_night);
        }
        observer.on_clock_tick(self.clock.ticks(), &display, self.motion.moving_count());

        let interval = self.config.output_interval_ticks;
        if interval > 0 && self.clock.ticks() % interval == 0 {
            observer.on_snapshot(self.clock.ticks(), tick.time, &self.agents, &self.motion);
        }

        if tick.day_ended {
            log::info!(
                "day ended after {} ticks; {} agents still moving",
                self.clock.ticks(),
                self.motion.moving_count()
            );
            observer.on_day_end(&display);
            return Ok(tick);
        }

        // Intent phase: read-only, ascending id.
        let ctx = SimContext::from_config(tick.time, &self.config);
        let intents: Vec<(AgentId, Intent)> =
            self.agents.iter().map(|(id, a)| (id, a.on_tick(&ctx))).collect();

        // Apply phase.
        for (agent, intent) in intents {
            match intent {
                Intent::Wait => {
                    if let Some(a) = self.agents.get_mut(agent) {
                        a.wait();
                    }
                }
                Intent::Defer => log::trace!("{agent} due at {} but still moving", tick.time),
                Intent::Depart { origin, destination } => {
                    self.depart(agent, origin, destination, observer)?;
                }
            }
        }
        Ok(tick)
    }

    /// Route and start the timetable entry at `agent`'s cursor.
    fn depart<O: SimObserver>(
        &mut self,
        agent:       AgentId,
        origin:      NodeId,
        destination: NodeId,
        observer:    &mut O,
    ) -> SimResult<()> {
        let time = self.clock.time();
        let sched = self.agents.get_mut(agent).ok_or(SimError::AgentNotFound(agent))?;

        match self.router.route(origin, destination) {
            Ok(route) => {
                sched.begin_moving()?;
                log::debug!("{time} {agent} departs: {route}");
                observer.on_departure(agent, time, &route);
                self.launch(agent, route, observer)
            }
            Err(err @ GraphError::NoPath { .. }) => {
                sched.abandon_current()?;
                log::warn!("{time} {agent} abandons its trip: {err}");
                observer.on_route_failed(agent, time, origin, destination, &err);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Bind an animation to a moving agent and register its first timer.
    fn launch<O: SimObserver>(&mut self, agent: AgentId, route: Route, observer: &mut O) -> SimResult<()> {
        let destination = route.destination();
        let waypoints = self.graph.positions_of(&route.nodes);
        let first = self.motion.begin(
            agent,
            route,
            waypoints,
            self.now_ms,
            self.config.segment_duration_ms,
            self.config.steps_per_segment,
        )?;
        match first {
            Some(due) => self.timers.push(due, agent),
            // Single-node route: already there.
            None => self.arrive(agent, destination, observer)?,
        }
        Ok(())
    }

    fn arrive<O: SimObserver>(&mut self, agent: AgentId, node: NodeId, observer: &mut O) -> SimResult<()> {
        let time = self.clock.time();
        self.agents
            .get_mut(agent)
            .ok_or(SimError::AgentNotFound(agent))?
            .finish_movement(node)?;
        log::debug!("{time} {agent} arrived at {node}");
        observer.on_arrival(agent, time, node);
        Ok(())
    }
}
