use thiserror::Error;

use cn_core::NodeId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("timetable parse error: {0}")]
    Parse(String),

    /// A timetable entry names a node the graph does not have.
    #[error("timetable entry {entry} refers to {node}, graph has {node_count} nodes")]
    InvalidNode { entry: usize, node: NodeId, node_count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
