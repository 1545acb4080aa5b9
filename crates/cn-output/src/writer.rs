//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, FrameRow, MovementRow, OutputResult, TickRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()>;

    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()>;

    fn write_movement(&mut self, row: &MovementRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.  Writing after `finish` is allowed (a reset starts a new
    /// day in the same files); call `finish` again afterwards.
    fn finish(&mut self) -> OutputResult<()>;
}
