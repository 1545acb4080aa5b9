//! Top-level simulation configuration.

use crate::{ClockTime, CoreError, CoreResult, NightPolicy};

/// Simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the simulation builder.  Every field has a
/// default, so a config file only needs the values it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Clock time at start and after a reset without an explicit time.
    pub start_time: ClockTime,

    /// Real milliseconds per tick.  One tick advances the clock one minute.
    pub tick_interval_ms: u64,

    /// A deadline counts as arrived when `|now - deadline| <= tolerance`.
    pub tolerance_minutes: u32,

    /// Animation time for one route segment (waypoint to waypoint).
    pub segment_duration_ms: u64,

    /// Interpolation frames emitted per segment.
    pub steps_per_segment: u32,

    /// First hour of night display mode.
    pub night_starts_at: u32,

    /// First hour of day display mode.
    pub day_starts_at: u32,

    /// When `true`, a timetable entry whose deadline passed while the agent
    /// was still moving departs as soon as the agent is free.  When `false`
    /// (reference behaviour) the entry only departs inside the tolerance
    /// window and otherwise waits for the rest of the day.
    pub late_departures: bool,

    /// Report agent positions to observers every N ticks.  0 disables.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// Check value ranges.  Call before building a simulation.
    pub fn validate(&self) -> CoreResult<()> {
        ClockTime::new(self.start_time.hours, self.start_time.minutes)?;
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.segment_duration_ms == 0 {
            return Err(CoreError::Config("segment_duration_ms must be > 0".into()));
        }
        if self.steps_per_segment == 0 {
            return Err(CoreError::Config("steps_per_segment must be > 0".into()));
        }
        if self.night_starts_at > 24 || self.day_starts_at > 24 {
            return Err(CoreError::Config(format!(
                "day/night thresholds must be hours in 0..=24, got night={} day={}",
                self.night_starts_at, self.day_starts_at
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn night_policy(&self) -> NightPolicy {
        NightPolicy {
            night_starts_at: self.night_starts_at,
            day_starts_at:   self.day_starts_at,
        }
    }

    /// Interval between two interpolation frames (integer ms, rounded down).
    #[inline]
    pub fn step_interval_ms(&self) -> u64 {
        self.segment_duration_ms / self.steps_per_segment.max(1) as u64
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let night = NightPolicy::default();
        Self {
            start_time:            ClockTime { hours: 7, minutes: 0 },
            tick_interval_ms:      1_000,
            tolerance_minutes:     1,
            segment_duration_ms:   800,
            steps_per_segment:     10,
            night_starts_at:       night.night_starts_at,
            day_starts_at:         night.day_starts_at,
            late_departures:       false,
            output_interval_ticks: 1,
        }
    }
}
