//! The `MotionStore` — displayed positions and in-flight animations.

use cn_core::{AgentId, Point};
use cn_graph::Route;

use crate::{Animation, Frame, MotionError, MotionResult};

/// One agent's traversal in progress.
#[derive(Clone, Debug)]
pub struct ActiveMove {
    pub route:      Route,
    pub animation:  Animation,
    /// Virtual time the traversal started.
    pub started_ms: u64,
}

impl ActiveMove {
    /// Absolute virtual time of the next frame.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.animation.next_offset_ms().map(|off| self.started_ms + off)
    }
}

/// Result of [`MotionStore::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum MotionEvent {
    /// An intermediate frame; the next one is due at `next_due_ms`.
    Frame { frame: Frame, next_due_ms: u64 },
    /// The last frame.  The traversal is over and has been removed.
    Arrived { frame: Frame, route: Route },
}

/// Positions of every agent plus a sparse slot for agents in motion.
///
/// Both vectors are indexed by `AgentId` and always have length
/// `agent_count`.
pub struct MotionStore {
    /// Displayed position; `None` for agents that were never placed.
    positions: Vec<Option<Point>>,
    active:    Vec<Option<ActiveMove>>,
}

impl MotionStore {
    pub fn new(agent_count: usize) -> Self {
        Self {
            positions: vec![None; agent_count],
            active:    (0..agent_count).map(|_| None).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Teleport `agent` to `pos` (initial placement, reset).
    pub fn place(&mut self, agent: AgentId, pos: Option<Point>) -> MotionResult<()> {
        *self
            .positions
            .get_mut(agent.index())
            .ok_or(MotionError::UnknownAgent(agent))? = pos;
        Ok(())
    }

    /// Start animating `agent` along `route` whose node positions are
    /// `waypoints`.
    ///
    /// The agent is placed at the first waypoint.  Returns the virtual time
    /// of the first frame, or `None` for a single-node route, which has no
    /// frames: the agent is already at its destination and nothing is
    /// stored.
    pub fn begin(
        &mut self,
        agent:               AgentId,
        route:               Route,
        waypoints:           Vec<Point>,
        started_ms:          u64,
        segment_duration_ms: u64,
        steps_per_segment:   u32,
    ) -> MotionResult<Option<u64>> {
        let slot = self.active.get(agent.index()).ok_or(MotionError::UnknownAgent(agent))?;
        if slot.is_some() {
            return Err(MotionError::AlreadyMoving(agent));
        }

        let animation = Animation::new(waypoints, segment_duration_ms, steps_per_segment)?;
        self.positions[agent.index()] = Some(animation.origin());

        let mv = ActiveMove { route, animation, started_ms };
        let first_due = mv.next_due_ms();
        if first_due.is_some() {
            self.active[agent.index()] = Some(mv);
        }
        Ok(first_due)
    }

    /// Emit the next frame of `agent`'s animation and update its position.
    ///
    /// `None` if the agent is not moving (never started, already arrived, or
    /// cancelled), so a stale timer is harmless.
    pub fn advance(&mut self, agent: AgentId) -> Option<MotionEvent> {
        let slot = self.active.get_mut(agent.index())?;
        let mv = slot.as_mut()?;
        let frame = mv.animation.next()?;
        self.positions[agent.index()] = Some(frame.position);

        match mv.next_due_ms() {
            Some(next_due_ms) => Some(MotionEvent::Frame { frame, next_due_ms }),
            None => {
                let done = slot.take()?;
                Some(MotionEvent::Arrived { frame, route: done.route })
            }
        }
    }

    /// Cancel and drop `agent`'s animation.  Returns `true` if one existed.
    /// The position stays where the last frame left it.
    pub fn cancel(&mut self, agent: AgentId) -> bool {
        match self.active.get_mut(agent.index()).and_then(Option::take) {
            Some(mut mv) => {
                mv.animation.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every animation.  Returns how many were in flight.
    pub fn cancel_all(&mut self) -> usize {
        let mut n = 0;
        for slot in &mut self.active {
            if let Some(mut mv) = slot.take() {
                mv.animation.cancel();
                n += 1;
            }
        }
        n
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Point> {
        self.positions.get(agent.index()).copied().flatten()
    }

    pub fn positions(&self) -> &[Option<Point>] {
        &self.positions
    }

    pub fn active(&self, agent: AgentId) -> Option<&ActiveMove> {
        self.active.get(agent.index())?.as_ref()
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.active(agent).is_some()
    }

    pub fn moving_count(&self) -> usize {
        self.active.iter().filter(|s| s.is_some()).count()
    }
}
