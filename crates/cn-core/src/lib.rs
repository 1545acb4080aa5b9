//! `cn-core` — foundational types for the `rust_campus` movement simulator.
//!
//! This crate is a dependency of every other `cn-*` crate.  It has no `cn-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `NodeId`                                        |
//! | [`geo`]    | `Point` (map-plane coordinates), linear interpolation      |
//! | [`time`]   | `ClockTime`, `SimClock`, `ClockTick`, `NightPolicy`        |
//! | [`config`] | `SimConfig`                                                |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{AgentId, NodeId};
pub use time::{ClockTick, ClockTime, NightPolicy, SimClock};
