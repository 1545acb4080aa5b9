//! Read-only simulation state passed to every agent check.

use cn_core::{ClockTime, SimConfig};

/// A snapshot of the clock and deadline rules for one tick.
///
/// Built once per tick by `cn-sim` and shared by every agent check during
/// the intent phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimContext {
    /// Clock time after this tick was applied.
    pub now: ClockTime,

    /// A deadline is due when `|now - deadline| <= tolerance_minutes`.
    pub tolerance_minutes: u32,

    /// Also treat a deadline as due once it has passed.
    pub late_departures: bool,
}

impl SimContext {
    #[inline]
    pub fn new(now: ClockTime, tolerance_minutes: u32, late_departures: bool) -> Self {
        Self { now, tolerance_minutes, late_departures }
    }

    /// Context for `now` using the deadline rules in `config`.
    pub fn from_config(now: ClockTime, config: &SimConfig) -> Self {
        Self::new(now, config.tolerance_minutes, config.late_departures)
    }

    /// `true` if an entry with `deadline` may depart now.
    #[inline]
    pub fn is_due(&self, deadline: ClockTime) -> bool {
        self.now.abs_diff_minutes(deadline) <= self.tolerance_minutes
            || (self.late_departures && self.now > deadline)
    }
}
