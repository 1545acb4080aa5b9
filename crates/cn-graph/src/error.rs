//! Graph-subsystem error type.

use thiserror::Error;

use cn_core::NodeId;

/// Errors produced by `cn-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Origin and destination are disconnected.  Structural: retrying with
    /// the same graph can never succeed.
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("{node} is out of range for a graph of {node_count} nodes")]
    InvalidNode { node: NodeId, node_count: usize },

    /// Load-time validation failure (non-square matrix, negative weight,
    /// non-zero diagonal, NaN).  Fatal: there is no safe default graph.
    #[error("malformed graph: {0}")]
    Malformed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
