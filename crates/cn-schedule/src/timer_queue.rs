//! `TimerQueue` — pending animation timers on the virtual millisecond
//! timeline.
//!
//! Every moving agent has exactly one entry: the virtual time at which its
//! next animation frame is due.  The driver pops everything due inside the
//! current tick window, advances those animations, and pushes the follow-up
//! timer.  A reset clears the queue wholesale, which unregisters every
//! pending callback at once.
//!
//! Entries due at the same millisecond pop in insertion order.

use std::collections::BTreeMap;

use cn_core::AgentId;

/// Ordered map of due time (virtual ms) → agents whose timer fires then.
#[derive(Default, Debug)]
pub struct TimerQueue {
    inner: BTreeMap<u64, Vec<AgentId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer for `agent` at virtual time `due_ms`.
    pub fn push(&mut self, due_ms: u64, agent: AgentId) {
        self.inner.entry(due_ms).or_default().push(agent);
        self.total += 1;
    }

    /// Remove and return the earliest entry if it is due at or before
    /// `now_ms`.
    ///
    /// Popping one entry at a time lets the caller push follow-up timers
    /// that are themselves due inside the same window.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, AgentId)> {
        let mut first = self.inner.first_entry()?;
        let due = *first.key();
        if due > now_ms {
            return None;
        }
        let agents = first.get_mut();
        let agent = agents.remove(0);
        if agents.is_empty() {
            first.remove();
        }
        self.total -= 1;
        Some((due, agent))
    }

    /// Drop every pending timer for `agent`.  Returns how many were removed.
    pub fn cancel(&mut self, agent: AgentId) -> usize {
        let mut removed = 0;
        self.inner.retain(|_, agents| {
            let before = agents.len();
            agents.retain(|&a| a != agent);
            removed += before - agents.len();
            !agents.is_empty()
        });
        self.total -= removed;
        removed
    }

    /// Unregister everything.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    /// The earliest due time, or `None` if empty.
    pub fn next_due(&self) -> Option<u64> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
