//! `cn-motion` — route animation and per-agent motion state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`animation`] | `Animation` (lazy `Frame` iterator), `Frame`                 |
//! | [`store`]     | `MotionStore` — active animations + displayed positions      |
//! | [`error`]     | `MotionError`, `MotionResult<T>`                             |
//!
//! # Movement model
//!
//! A route with waypoints `p0, p1, .., pn` is animated as `n` segments of
//! `segment_duration_ms` each.  Every segment is split into
//! `steps_per_segment` frames:
//!
//! ```text
//! frame(seg, s).position  = p[seg] + s * (p[seg+1] - p[seg]) / steps    s = 1..=steps
//! frame(seg, s).offset_ms = seg * segment_ms + s * segment_ms / steps
//! ```
//!
//! Positions are computed from the segment endpoints every time, never by
//! adding deltas, so the last frame of each segment lands exactly on the
//! waypoint.  The final frame is the arrival; a cancelled animation yields
//! nothing more and never arrives.

pub mod animation;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use animation::{Animation, Frame};
pub use error::{MotionError, MotionResult};
pub use store::{ActiveMove, MotionEvent, MotionStore};
