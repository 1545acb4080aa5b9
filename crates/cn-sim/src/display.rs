//! What a rendering front end reads once per tick.

use std::fmt;

use cn_core::{ClockTime, NightPolicy, SimClock};

/// Current simulated time plus the day/night flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub hours:     u32,
    pub minutes:   u32,
    pub is_night:  bool,
    pub day_ended: bool,
}

impl DisplaySnapshot {
    pub fn from_clock(clock: &SimClock, night: &NightPolicy) -> Self {
        let time = clock.time();
        Self {
            hours:     time.hours,
            minutes:   time.minutes,
            is_night:  night.is_night(time.hours),
            day_ended: clock.day_ended(),
        }
    }

    pub fn time(&self) -> ClockTime {
        ClockTime { hours: self.hours, minutes: self.minutes }
    }
}

impl fmt::Display for DisplaySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hours, self.minutes, if self.is_night { "night" } else { "day" })?;
        if self.day_ended {
            f.write_str(" (day ended)")?;
        }
        Ok(())
    }
}
