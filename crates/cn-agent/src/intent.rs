//! Agent intents: what an agent asks the driver to do on a clock tick.

use cn_core::NodeId;

/// The answer of [`AgentScheduler::on_tick`][crate::AgentScheduler::on_tick].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// The entry at the cursor is not due (or there is none).
    Wait,

    /// The entry is due but the agent is still moving.  Re-checked on the
    /// next tick; the current traversal is not interrupted.
    Defer,

    /// The entry is due and the agent is free: route `origin → destination`
    /// and start moving.
    Depart {
        origin:      NodeId,
        destination: NodeId,
    },
}
