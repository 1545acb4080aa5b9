//! `cn-agent` — per-agent timetable state machine and agent storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`state`]     | `AgentState` (`Idle`, `WaitingForDeadline`, `Moving`)       |
//! | [`intent`]    | `Intent` (`Wait`, `Defer`, `Depart`)                        |
//! | [`context`]   | `SimContext` — read-only per-tick snapshot                  |
//! | [`scheduler`] | `AgentScheduler` — cursor, state and position of one agent  |
//! | [`store`]     | `AgentStore` — all agents, indexed by `AgentId`             |
//! | [`builder`]   | `AgentStoreBuilder`                                         |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                              |
//!
//! # Tick protocol
//!
//! The driver runs two phases per clock tick:
//!
//! 1. **Intent phase**: every agent, in ascending `AgentId` order, answers
//!    [`AgentScheduler::on_tick`] with an [`Intent`].  Read-only.
//!
//! 2. **Apply phase**: the driver acts on each intent.  `Wait` →
//!    [`AgentScheduler::wait`]; `Defer` → nothing; `Depart` → route lookup,
//!    then [`AgentScheduler::begin_moving`] or
//!    [`AgentScheduler::abandon_current`].
//!
//! Movement completion arrives later from the animation timers through
//! [`AgentScheduler::finish_movement`].

pub mod builder;
pub mod context;
pub mod error;
pub mod intent;
pub mod scheduler;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use context::SimContext;
pub use error::{AgentError, AgentResult};
pub use intent::Intent;
pub use scheduler::AgentScheduler;
pub use state::AgentState;
pub use store::AgentStore;
