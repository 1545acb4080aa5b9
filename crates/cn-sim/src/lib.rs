//! `cn-sim` — the virtual-time driver for the campus movement simulator.
//!
//! # Timeline
//!
//! One logical timeline in virtual milliseconds, driven by one loop.  A clock
//! tick happens every `tick_interval_ms`; animation frames fire in between.
//!
//! ```text
//! step():
//!   ① Timers   — pop every animation timer due up to the tick boundary,
//!                in (due_ms, insertion) order; emit frames; arrivals call
//!                AgentScheduler::finish_movement.
//!   ② Clock    — SimClock::tick (one simulated minute), day/night change,
//!                end of day.
//!   ③ Intents  — AgentScheduler::on_tick for every agent, ascending id.
//!   ④ Apply    — Wait → wait(); Defer → nothing;
//!                Depart → route, then begin_moving + animation timer,
//!                or abandon_current on NoPath.
//! ```
//!
//! Nothing blocks: a suspended agent is an entry in the `TimerQueue`.
//! `reset` clears the queue and drops every animation, so no stale frame can
//! fire afterwards.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cn_agent::AgentStoreBuilder;
//! use cn_core::SimConfig;
//! use cn_sim::{NoopObserver, SimBuilder};
//!
//! let agents = AgentStoreBuilder::new().agents(timetables).build();
//! let mut sim = SimBuilder::all_pairs(SimConfig::default(), graph, agents).build()?;
//! sim.start();
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod display;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use display::DisplaySnapshot;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
