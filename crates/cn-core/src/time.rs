//! Simulated time-of-day model.
//!
//! # Design
//!
//! The simulation covers a single day.  Time is an `hours:minutes` pair that
//! starts at a configured morning time and advances by exactly one simulated
//! minute per real-time tick.  `24:00` is terminal: once reached the clock
//! clamps there, reports `day_ended`, and ignores further ticks until it is
//! explicitly reset.
//!
//! Deadline arithmetic uses [`ClockTime::total_minutes`] so comparisons are
//! plain integer maths with no calendar library.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── ClockTime ─────────────────────────────────────────────────────────────────

/// A time of day in whole minutes, `00:00 ..= 24:00`.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ClockTime {
    pub hours:   u32,
    pub minutes: u32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hours: 0, minutes: 0 };

    /// The terminal time of the simulated day.
    pub const END_OF_DAY: ClockTime = ClockTime { hours: 24, minutes: 0 };

    /// Construct a validated time.  `24:00` is allowed, nothing later.
    pub fn new(hours: u32, minutes: u32) -> CoreResult<Self> {
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(CoreError::InvalidTime { hours, minutes });
        }
        Ok(Self { hours, minutes })
    }

    /// Build from minutes since midnight, clamping at `24:00`.
    pub fn from_minutes(total: u32) -> Self {
        let total = total.min(Self::END_OF_DAY.total_minutes());
        Self { hours: total / 60, minutes: total % 60 }
    }

    /// Minutes since midnight.
    #[inline]
    pub fn total_minutes(self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// Absolute distance in minutes between two times.
    #[inline]
    pub fn abs_diff_minutes(self, other: ClockTime) -> u32 {
        self.total_minutes().abs_diff(other.total_minutes())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    /// Parse `"H:MM"` or `"HH:MM"`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| CoreError::Parse(format!("expected HH:MM, got {s:?}")))?;
        let hours = h
            .parse::<u32>()
            .map_err(|e| CoreError::Parse(format!("invalid hours in {s:?}: {e}")))?;
        let minutes = m
            .parse::<u32>()
            .map_err(|e| CoreError::Parse(format!("invalid minutes in {s:?}: {e}")))?;
        ClockTime::new(hours, minutes)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CoreError;
    fn try_from(s: String) -> CoreResult<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

// ── NightPolicy ───────────────────────────────────────────────────────────────

/// Hour thresholds that split the day into day and night display modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NightPolicy {
    /// First hour counted as night (inclusive).
    pub night_starts_at: u32,
    /// First hour counted as day again (inclusive).
    pub day_starts_at:   u32,
}

impl NightPolicy {
    /// `true` when `hours >= night_starts_at` or `hours < day_starts_at`.
    #[inline]
    pub fn is_night(&self, hours: u32) -> bool {
        hours >= self.night_starts_at || hours < self.day_starts_at
    }
}

impl Default for NightPolicy {
    fn default() -> Self {
        Self { night_starts_at: 19, day_starts_at: 6 }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Result of one [`SimClock::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockTick {
    /// Time after the tick was applied.
    pub time:      ClockTime,
    /// `true` once the clock has reached `24:00`; stays `true` until reset.
    pub day_ended: bool,
    /// `false` if the tick was a no-op because the day had already ended.
    pub advanced:  bool,
}

/// The process-wide simulated clock.
///
/// Owned by the driving loop; everything else reads it through snapshots.
#[derive(Clone, Debug)]
pub struct SimClock {
    time:      ClockTime,
    day_ended: bool,
    /// Ticks applied since construction or the last reset.
    ticks:     u64,
}

impl SimClock {
    /// Create a clock starting at `start`.
    pub fn new(start: ClockTime) -> Self {
        Self {
            time:      start,
            day_ended: start >= ClockTime::END_OF_DAY,
            ticks:     0,
        }
    }

    /// Advance by exactly one simulated minute.
    ///
    /// Reaching hour 24 clamps to `24:00` and ends the day.  Once ended,
    /// further calls change nothing and report `advanced = false`.
    pub fn tick(&mut self) -> ClockTick {
        if self.day_ended {
            return ClockTick { time: self.time, day_ended: true, advanced: false };
        }

        self.time.minutes += 1;
        if self.time.minutes >= 60 {
            self.time.hours += self.time.minutes / 60;
            self.time.minutes %= 60;
        }
        if self.time.hours >= 24 {
            self.time = ClockTime::END_OF_DAY;
            self.day_ended = true;
        }
        self.ticks += 1;

        ClockTick { time: self.time, day_ended: self.day_ended, advanced: true }
    }

    /// Reinitialise to `start` and clear the end-of-day flag.
    pub fn reset(&mut self, start: ClockTime) {
        *self = SimClock::new(start);
    }

    #[inline]
    pub fn time(&self) -> ClockTime {
        self.time
    }

    #[inline]
    pub fn day_ended(&self) -> bool {
        self.day_ended
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.day_ended {
            write!(f, "{} (day ended)", self.time)
        } else {
            write!(f, "{}", self.time)
        }
    }
}
