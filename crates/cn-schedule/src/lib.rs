//! `cn-schedule` — per-agent timetables, the animation timer queue, and CSV
//! loading.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`timetable`]   | `TimetableEvent`, `Timetable`                         |
//! | [`timer_queue`] | `TimerQueue` (`BTreeMap<due_ms, Vec<AgentId>>`)       |
//! | [`loader`]      | `load_timetables_csv`, `load_timetables_reader`       |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Timetable model (summary)
//!
//! A timetable is an ordered list of `(deadline, origin, destination)`
//! entries.  Entries are processed strictly in sequence through a cursor held
//! by the agent; nothing here re-orders them, and a later entry is never
//! considered before the one at the cursor.

pub mod error;
pub mod loader;
pub mod timer_queue;
pub mod timetable;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_timetables_csv, load_timetables_reader};
pub use timer_queue::TimerQueue;
pub use timetable::{Timetable, TimetableEvent};
